//! AcademicLevelRepository - Repository per i livelli accademici

use super::{ApiClient, Create, Delete, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::AcademicLevelDTO;
use crate::entities::AcademicLevel;
use crate::routes::{academic_level, with_id};
use std::sync::Arc;

pub struct AcademicLevelRepository {
    api: Arc<ApiClient>,
}

impl AcademicLevelRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl Create<AcademicLevel, AcademicLevelDTO> for AcademicLevelRepository {
    async fn create(&self, data: &AcademicLevelDTO) -> Result<AcademicLevel, AppError> {
        self.api.post(academic_level::CREATE, data).await
    }
}

impl ReadAll<AcademicLevel> for AcademicLevelRepository {
    async fn read_all(&self) -> Result<Vec<AcademicLevel>, AppError> {
        self.api.get(academic_level::GET_ALL).await
    }
}

impl Update<AcademicLevel, AcademicLevelDTO, i32> for AcademicLevelRepository {
    async fn update(&self, id: &i32, data: &AcademicLevelDTO) -> Result<AcademicLevel, AppError> {
        self.api
            .post(&with_id(academic_level::UPDATE, *id), data)
            .await
    }
}

impl Delete<i32> for AcademicLevelRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(academic_level::DELETE, *id)).await
    }
}
