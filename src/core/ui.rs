//! UI state - Finestra di dialogo aperta ed elementi correnti
//!
//! Un solo dialogo può essere aperto alla volta. Il dialogo porta con sé l'id
//! dell'oggetto su cui lavora, così non esistono combinazioni tipo/stato incoerenti.

use crate::entities::{Category, Service};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    AppointmentList,
    EditAppointment { appointment_id: i32 },
    UpdateAppointmentStatus { appointment_id: i32 },
    DeleteAppointment { appointment_id: i32 },
    BookService { service_id: i32 },
    EditProfile,
    DeleteAccount,
    Cart,
    EmployeeList,
    AddCategory,
    EditCategory { category_id: i32 },
    ManageServices,
    StaffAdministration,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

#[derive(Default)]
struct UiInner {
    dialog: Dialog,
    current_service: Option<Service>,
    current_category: Option<Category>,
}

#[derive(Default)]
pub struct UiState {
    inner: RwLock<UiInner>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> Dialog {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).dialog
    }

    pub fn open(&self, dialog: Dialog) {
        debug!(?dialog, "Opening dialog");
        self.inner.write().unwrap_or_else(PoisonError::into_inner).dialog = dialog;
    }

    pub fn close(&self) {
        self.open(Dialog::None);
    }

    pub fn current_service(&self) -> Option<Service> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_service
            .clone()
    }

    pub fn set_current_service(&self, service: Option<Service>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .current_service = service;
    }

    pub fn current_category(&self) -> Option<Category> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_category
            .clone()
    }

    pub fn set_current_category(&self, category: Option<Category>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .current_category = category;
    }

    /// Chiude il dialogo e dimentica gli elementi correnti
    pub fn reset(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = UiInner::default();
    }
}
