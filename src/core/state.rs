//! Application State - Stato condiviso del client
//!
//! Contiene i repository, la cache delle query e lo stato condiviso fra le
//! schermate: sessione, mutazioni in corso, notifiche e dialogo aperto.

use crate::core::auth::{Session, SessionStore};
use crate::core::cache::QueryCache;
use crate::core::notify::{Notification, Notifier};
use crate::core::pending::InFlight;
use crate::core::ui::UiState;
use crate::core::{AppError, Config};
use crate::entities::CurrentUser;
use crate::repositories::{
    AcademicLevelRepository, ApiClient, AppointmentRepository, CartRepository, CategoryRepository,
    ServiceRepository, UserRepository, ValidationCodeRepository,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Stato globale del client condiviso da tutte le schermate
pub struct AppState {
    /// Trasporto HTTP condiviso da tutti i repository
    pub api: Arc<ApiClient>,

    /// Repository per clienti e funzionari
    pub user: UserRepository,

    pub category: CategoryRepository,

    pub service: ServiceRepository,

    pub appointment: AppointmentRepository,

    pub cart: CartRepository,

    pub academic_level: AcademicLevelRepository,

    pub validation_code: ValidationCodeRepository,

    /// Cache read-through delle letture
    pub cache: QueryCache,

    /// Mutazioni in corso, per bloccare i doppi invii
    pub in_flight: InFlight,

    /// Canale dei toast verso l'interfaccia
    pub notifier: Notifier,

    /// Dialogo aperto e servizio/categoria correnti
    pub ui: UiState,

    /// File in cui viene persistita la sessione
    pub session_store: SessionStore,

    session: RwLock<Option<Session>>,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando il trasporto e tutti i repository
    ///
    /// # Arguments
    /// * `config` - Configurazione caricata da `Config::from_env`
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let api = Arc::new(ApiClient::new(&config.api_base_url, config.request_timeout)?);

        Ok(Self {
            user: UserRepository::new(api.clone()),
            category: CategoryRepository::new(api.clone()),
            service: ServiceRepository::new(api.clone()),
            appointment: AppointmentRepository::new(api.clone()),
            cart: CartRepository::new(api.clone()),
            academic_level: AcademicLevelRepository::new(api.clone()),
            validation_code: ValidationCodeRepository::new(api.clone()),
            api,
            cache: QueryCache::new(),
            in_flight: InFlight::new(),
            notifier: Notifier::new(),
            ui: UiState::new(),
            session_store: SessionStore::new(config.session_file.clone()),
            session: RwLock::new(None),
        })
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.session().map(|session| session.user)
    }

    /// Installa (o rimuove) la sessione in memoria e il token sul trasporto
    pub(crate) fn set_session(&self, session: Option<Session>) {
        self.api.set_token(session.as_ref().map(|s| s.token.clone()));
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Pubblica il toast di esito di un'operazione e restituisce il risultato invariato
    pub fn report<T>(
        &self,
        result: Result<T, AppError>,
        title: &'static str,
        success_message: &'static str,
    ) -> Result<T, AppError> {
        match &result {
            Ok(_) => {
                debug!(title, "Operation succeeded");
                self.notifier
                    .notify(Notification::success(title, success_message));
            }
            Err(e) => {
                warn!(title, "Operation failed: {}", e);
                self.notifier.notify(e.to_notification());
            }
        }
        result
    }
}
