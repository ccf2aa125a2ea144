//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository incapsula le chiamate REST di una risorsa dell'API del salone.
//! Tutti condividono lo stesso [`ApiClient`], che porta il token della sessione.

// ************************* MODULI REPOSITORY ************************* //

pub mod academic_level;
pub mod appointment;
pub mod cart;
pub mod category;
pub mod http;
pub mod service;
pub mod traits;
pub mod user;
pub mod validation_code;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, ReadAll, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use academic_level::AcademicLevelRepository;
pub use appointment::AppointmentRepository;
pub use cart::CartRepository;
pub use category::CategoryRepository;
pub use http::ApiClient;
pub use service::ServiceRepository;
pub use user::UserRepository;
pub use validation_code::ValidationCodeRepository;
