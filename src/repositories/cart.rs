//! CartRepository - Repository per i carrelli dei clienti

use super::{ApiClient, Create, Delete, Read, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::{CreateCartDTO, UpdateCartDTO};
use crate::entities::Cart;
use crate::routes::{cart, with_id};
use std::sync::Arc;

pub struct CartRepository {
    api: Arc<ApiClient>,
}

impl CartRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Carrello del cliente, `None` se non ne ha ancora uno
    pub async fn find_by_client_id(&self, client_id: &i32) -> Result<Option<Cart>, AppError> {
        self.api
            .get_optional(&with_id(cart::BY_CLIENT, *client_id))
            .await
    }
}

impl Create<(), CreateCartDTO> for CartRepository {
    async fn create(&self, data: &CreateCartDTO) -> Result<(), AppError> {
        self.api.post_unit(cart::CREATE, data).await
    }
}

impl Read<Cart, i32> for CartRepository {
    async fn read(&self, id: &i32) -> Result<Option<Cart>, AppError> {
        self.api.get_optional(&with_id(cart::GET_ONE, *id)).await
    }
}

impl ReadAll<Cart> for CartRepository {
    async fn read_all(&self) -> Result<Vec<Cart>, AppError> {
        self.api.get(cart::GET_ALL).await
    }
}

impl Update<(), UpdateCartDTO, i32> for CartRepository {
    async fn update(&self, id: &i32, data: &UpdateCartDTO) -> Result<(), AppError> {
        self.api.post_unit(&with_id(cart::UPDATE, *id), data).await
    }
}

impl Delete<i32> for CartRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(cart::DELETE, *id)).await
    }
}
