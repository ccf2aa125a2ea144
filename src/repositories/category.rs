//! CategoryRepository - Repository per le categorie

use super::{ApiClient, Create, Delete, Read, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::{CreateCategoryDTO, UpdateCategoryDTO};
use crate::entities::Category;
use crate::routes::{category, with_id};
use std::sync::Arc;

pub struct CategoryRepository {
    api: Arc<ApiClient>,
}

impl CategoryRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl Create<Category, CreateCategoryDTO> for CategoryRepository {
    async fn create(&self, data: &CreateCategoryDTO) -> Result<Category, AppError> {
        self.api.post(category::CREATE, data).await
    }
}

impl Read<Category, i32> for CategoryRepository {
    async fn read(&self, id: &i32) -> Result<Option<Category>, AppError> {
        self.api.get_optional(&with_id(category::GET_ONE, *id)).await
    }
}

impl ReadAll<Category> for CategoryRepository {
    async fn read_all(&self) -> Result<Vec<Category>, AppError> {
        self.api.get(category::GET_ALL).await
    }
}

impl Update<Category, UpdateCategoryDTO, i32> for CategoryRepository {
    async fn update(&self, id: &i32, data: &UpdateCategoryDTO) -> Result<Category, AppError> {
        self.api.post(&with_id(category::UPDATE, *id), data).await
    }
}

impl Delete<i32> for CategoryRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(category::DELETE, *id)).await
    }
}
