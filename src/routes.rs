//! Routes - Percorsi dell'API REST raggruppati per risorsa
//!
//! I percorsi con `{id}` nella documentazione sono costanti senza id: l'id viene
//! aggiunto come ultimo segmento con [`with_id`].

pub mod employee {
    pub const CREATE: &str = "/employee/create";
    pub const LOGIN: &str = "/employee/login";
    pub const GET_ALL: &str = "/employee/getAllEmployees";
    pub const GET_ONE: &str = "/employee/getOneEmployee";
    pub const UPDATE_PROFILE: &str = "/employee/updateInfoProfile";
    pub const DELETE: &str = "/employee/deleteEmployee";
}

pub mod client {
    pub const CREATE: &str = "/client/create";
    pub const LOGIN: &str = "/client/login";
    pub const GET_ONE: &str = "/client/getOneClient";
    pub const UPDATE_PROFILE: &str = "/client/updateInfoProfile";
    pub const DELETE: &str = "/client/deleteClient";
}

pub mod category {
    pub const GET_ALL: &str = "/category/getAllCategories";
    pub const GET_ONE: &str = "/category/getOneCategory";
    pub const CREATE: &str = "/category/create";
    pub const UPDATE: &str = "/category/update";
    pub const DELETE: &str = "/category/delete";
}

pub mod service {
    pub const GET_ALL: &str = "/service/getAllServices";
    pub const GET_ONE: &str = "/service/getOneService";
    pub const CREATE: &str = "/service/create";
    pub const UPDATE: &str = "/service/update";
    pub const DELETE: &str = "/service/delete";
}

pub mod appointment {
    pub const CREATE: &str = "/appointment/create";
    pub const GET_ALL: &str = "/appointment/getAllAppointments";
    pub const GET_ONE: &str = "/appointment/getOneAppointment";
    pub const UPDATE: &str = "/appointment/update";
    pub const DELETE: &str = "/appointment/delete";
    pub const UPDATE_STATUS: &str = "/appointment/updateStatus";
}

pub mod cart {
    pub const CREATE: &str = "/cart/create";
    pub const GET_ALL: &str = "/cart/getAllCarts";
    pub const GET_ONE: &str = "/cart/getOneCart";
    pub const UPDATE: &str = "/cart/update";
    pub const DELETE: &str = "/cart/delete";
    pub const BY_CLIENT: &str = "/cart/getCartByClientId";
}

pub mod academic_level {
    pub const GET_ALL: &str = "/academicLevel/getAllAcademicLevels";
    pub const CREATE: &str = "/academicLevel/create";
    pub const UPDATE: &str = "/academicLevel/update";
    pub const DELETE: &str = "/academicLevel/delete";
}

pub mod validation_code {
    pub const GET_ALL: &str = "/codeValidationToEmployee/getAllCodeValidations";
    pub const CREATE: &str = "/codeValidationToEmployee/create";
    pub const UPDATE: &str = "/codeValidationToEmployee/update";
    pub const DELETE: &str = "/codeValidationToEmployee/delete";
}

pub fn with_id(base: &str, id: i32) -> String {
    format!("{}/{}", base, id)
}
