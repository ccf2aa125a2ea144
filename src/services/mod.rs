//! Services module - Coordinatore per tutte le operazioni dell'applicazione
//!
//! Ogni sotto-modulo raggruppa le operazioni di una funzionalità: controlla ruoli e
//! stato, chiama i repository, invalida la cache e pubblica la notifica finale.

pub mod account;
pub mod appointment;
pub mod availability;
pub mod cart;
pub mod catalog;
pub mod staff;

// Re-exports per facilitare l'import
pub use account::{
    create_account, delete_account, get_profile, login, logout, restore_session, update_profile,
};
pub use appointment::{
    create_appointment, delete_appointment, edit_appointment, filter_appointments,
    get_appointment, list_appointments, update_appointment_status,
};
pub use availability::{ensure_slot_available, is_slot_available};
pub use cart::{
    BulkOutcome, CartTotals, add_to_cart, clear_cart, compute_totals, get_cart, remove_from_cart,
    schedule_all, schedule_appointment,
};
pub use catalog::{
    create_category, create_service, delete_category, delete_service, get_category,
    get_employee, get_service, list_categories, list_employees, list_services, update_category,
    update_service,
};
pub use staff::{
    create_academic_level, create_validation_code, delete_academic_level, delete_validation_code,
    list_academic_levels, list_validation_codes, update_academic_level, update_validation_code,
};
