//! Salon booking library - espone il nucleo client del sistema di prenotazioni
//!
//! Il binario e i test d'integrazione costruiscono un [`AppState`] e chiamano le
//! operazioni esposte da [`services`].

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, Config, ErrorKind};
