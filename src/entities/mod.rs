//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene le entità così come le espone l'API REST del salone.
//! Esiste una sola forma canonica per entità, i nomi sul filo sono in camelCase.

pub mod academic_level;
pub mod appointment;
pub mod cart;
pub mod category;
pub mod de;
pub mod enums;
pub mod service;
pub mod user;
pub mod validation_code;

// Re-exports per facilitare l'import
pub use academic_level::AcademicLevel;
pub use appointment::Appointment;
pub use cart::Cart;
pub use category::Category;
pub use enums::{AppointmentStatus, ColorToken, Role};
pub use service::Service;
pub use user::{BlockedHours, Client, CurrentUser, Employee, Picture, Profile, UserProfile};
pub use validation_code::ValidationCode;
