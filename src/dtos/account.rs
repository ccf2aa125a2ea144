//! Account DTOs - Registrazione, login e aggiornamento del profilo

use crate::entities::{BlockedHours, CurrentUser, Role};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

lazy_static! {
    // alfabeto ammesso per i codici di validazione dei funzionari
    static ref EMPLOYEE_CODE_CHARSET: Regex = Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8,}$").unwrap();
}

const EMPLOYEE_CODE_SPECIALS: &str = "@$!%*#?&";

/// Almeno 8 caratteri da `[A-Za-z0-9@$!%*#?&]`, con almeno una lettera, una cifra e un carattere speciale
pub fn is_valid_employee_code(code: &str) -> bool {
    EMPLOYEE_CODE_CHARSET.is_match(code)
        && code.chars().any(|c| c.is_ascii_alphabetic())
        && code.chars().any(|c| c.is_ascii_digit())
        && code.chars().any(|c| EMPLOYEE_CODE_SPECIALS.contains(c))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_create_account(dto: &CreateAccountDTO) -> Result<(), ValidationError> {
    if dto.password != dto.confirm_password {
        return Err(error("password_mismatch", "Senhas não conferem"));
    }

    if let Some(code) = &dto.validation_code {
        if !is_valid_employee_code(code) {
            return Err(error(
                "validation_code",
                "codigo inválido, deve conter 8 digitos um numero e uma letra e um caracter especial (@$!%*#?&).",
            ));
        }
    }

    Ok(())
}

/// DTO di registrazione. I clienti vanno su `/client/create`, tutti gli altri su `/employee/create`.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_account"))]
pub struct CreateAccountDTO {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub username: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "Senha deve ter no mínimo 6 caracteres"))]
    pub password: String,

    #[serde(skip_serializing)]
    pub confirm_password: String,

    #[validate(length(equal = 9, message = "Número de telefone inválido"))]
    pub cellphone: String,

    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub services_ids: Option<Vec<i32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_ids: Option<Vec<i32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_level_id: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateAccountResponseDTO {
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct LoginDTO {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "Senha deve ter no mínimo 6 caracteres"))]
    pub password: String,

    pub role: Role,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginResponseDTO {
    pub user: CurrentUser,
    pub token: String,
}

/// Solo i campi `Some(_)` vengono inviati e modificati
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileDTO {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 9, message = "Número de telefone inválido"))]
    pub cellphone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Data URL prodotto da `utils::encode_photo`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Orari bloccati, solo per funzionari e gerenti
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<BlockedHours>,
}
