//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene i payload inviati all'API REST e i form validati lato client.
//! I DTOs separano la rappresentazione sul filo dalle entità.

pub mod account;
pub mod appointment;
pub mod cart;
pub mod catalog;
pub mod query;

// Re-exports per facilitare l'import
pub use account::{
    CreateAccountDTO, CreateAccountResponseDTO, LoginDTO, LoginResponseDTO, UpdateUserProfileDTO,
};
pub use appointment::{
    BookingFormDTO, CreateAppointmentDTO, UpdateAppointmentDTO, UpdateAppointmentStatusDTO,
};
pub use cart::{CreateCartDTO, UpdateCartDTO};
pub use catalog::{
    AcademicLevelDTO, CreateCategoryDTO, CreateServiceDTO, InlineServiceDTO, UpdateCategoryDTO,
    UpdateServiceDTO, ValidationCodeDTO,
};
pub use query::AppointmentFilter;
