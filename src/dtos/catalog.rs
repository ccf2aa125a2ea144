//! Catalog DTOs - Categorie, servizi, livelli accademici e codici dei funzionari

use crate::utils::encode_photo;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Servizio creato insieme alla sua categoria
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InlineServiceDTO {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "Preço inválido"))]
    pub price: i64,
    #[validate(range(min = 1, message = "Duração inválida"))]
    pub duration: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDTO {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub services: Vec<InlineServiceDTO>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDTO {
    pub id: i32,
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceDTO {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "Preço inválido"))]
    pub price: i64,
    #[validate(range(min = 1, message = "Duração inválida"))]
    pub duration: u32,
    pub category_id: i32,
    /// Data URL prodotto da `utils::encode_photo`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceDTO {
    pub id: i32,
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "Preço inválido"))]
    pub price: i64,
    #[validate(range(min = 1, message = "Duração inválida"))]
    pub duration: u32,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl CreateServiceDTO {
    /// Allega la foto come data URL base64
    pub fn with_photo(mut self, bytes: &[u8], mime: &str) -> Self {
        self.photo = Some(encode_photo(bytes, mime));
        self
    }
}

impl UpdateServiceDTO {
    pub fn with_photo(mut self, bytes: &[u8], mime: &str) -> Self {
        self.photo = Some(encode_photo(bytes, mime));
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct AcademicLevelDTO {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct ValidationCodeDTO {
    #[validate(custom(function = "validate_code_characters"))]
    pub characters: String,
    pub description: String,
}

fn validate_code_characters(characters: &str) -> Result<(), validator::ValidationError> {
    if super::account::is_valid_employee_code(characters) {
        return Ok(());
    }

    let mut err = validator::ValidationError::new("validation_code");
    err.message = Some(std::borrow::Cow::Borrowed(
        "codigo inválido, deve conter 8 digitos um numero e uma letra e um caracter especial (@$!%*#?&).",
    ));
    Err(err)
}
