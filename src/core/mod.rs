//! Core Module - Componenti infrastrutturali del client
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Sessione, JWT e controlli di accesso
//! - Configurazione
//! - Gestione errori e notifiche
//! - Cache delle query e mutazioni in corso
//! - Stato dell'interfaccia e stato applicazione

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod notify;
pub mod pending;
pub mod state;
pub mod ui;

// Re-exports per facilitare l'import
pub use auth::{
    Claims, Confirmation, Session, SessionStore, can_manage, decode_claims, ensure_can_manage,
    require_role,
};
pub use cache::{QueryCache, QueryKey};
pub use config::Config;
pub use error::{AppError, ErrorKind};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use pending::{InFlight, PendingGuard};
pub use state::AppState;
pub use ui::{Dialog, UiState};
