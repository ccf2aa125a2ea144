//! ValidationCodeRepository - Repository per i codici di registrazione dei funzionari

use super::{ApiClient, Create, Delete, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::ValidationCodeDTO;
use crate::entities::ValidationCode;
use crate::routes::{validation_code, with_id};
use std::sync::Arc;

pub struct ValidationCodeRepository {
    api: Arc<ApiClient>,
}

impl ValidationCodeRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl Create<ValidationCode, ValidationCodeDTO> for ValidationCodeRepository {
    async fn create(&self, data: &ValidationCodeDTO) -> Result<ValidationCode, AppError> {
        self.api.post(validation_code::CREATE, data).await
    }
}

impl ReadAll<ValidationCode> for ValidationCodeRepository {
    async fn read_all(&self) -> Result<Vec<ValidationCode>, AppError> {
        self.api.get(validation_code::GET_ALL).await
    }
}

impl Update<ValidationCode, ValidationCodeDTO, i32> for ValidationCodeRepository {
    async fn update(&self, id: &i32, data: &ValidationCodeDTO) -> Result<ValidationCode, AppError> {
        self.api
            .post(&with_id(validation_code::UPDATE, *id), data)
            .await
    }
}

impl Delete<i32> for ValidationCodeRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(validation_code::DELETE, *id)).await
    }
}
