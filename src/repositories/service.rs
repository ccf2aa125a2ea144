//! ServiceRepository - Repository per i servizi del salone

use super::{ApiClient, Create, Delete, Read, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::{CreateServiceDTO, UpdateServiceDTO};
use crate::entities::Service;
use crate::routes::{service, with_id};
use std::sync::Arc;

pub struct ServiceRepository {
    api: Arc<ApiClient>,
}

impl ServiceRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl Create<Service, CreateServiceDTO> for ServiceRepository {
    async fn create(&self, data: &CreateServiceDTO) -> Result<Service, AppError> {
        self.api.post(service::CREATE, data).await
    }
}

impl Read<Service, i32> for ServiceRepository {
    async fn read(&self, id: &i32) -> Result<Option<Service>, AppError> {
        self.api.get_optional(&with_id(service::GET_ONE, *id)).await
    }
}

impl ReadAll<Service> for ServiceRepository {
    async fn read_all(&self) -> Result<Vec<Service>, AppError> {
        self.api.get(service::GET_ALL).await
    }
}

impl Update<Service, UpdateServiceDTO, i32> for ServiceRepository {
    async fn update(&self, id: &i32, data: &UpdateServiceDTO) -> Result<Service, AppError> {
        self.api.post(&with_id(service::UPDATE, *id), data).await
    }
}

impl Delete<i32> for ServiceRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(service::DELETE, *id)).await
    }
}
