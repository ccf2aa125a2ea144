//! UserRepository - Repository per clienti, funzionari e gerenti
//!
//! L'API separa i clienti (`/client/*`) da tutti gli altri ruoli (`/employee/*`).

use super::ApiClient;
use crate::core::AppError;
use crate::dtos::{
    CreateAccountDTO, CreateAccountResponseDTO, LoginDTO, LoginResponseDTO, UpdateUserProfileDTO,
};
use crate::entities::{Employee, Role, UserProfile};
use crate::routes::{client, employee, with_id};
use std::sync::Arc;

/// Percorsi da usare per un ruolo
struct Scope {
    create: &'static str,
    login: &'static str,
    get_one: &'static str,
    update_profile: &'static str,
    delete: &'static str,
}

fn scope(role: Role) -> Scope {
    match role {
        Role::Client => Scope {
            create: client::CREATE,
            login: client::LOGIN,
            get_one: client::GET_ONE,
            update_profile: client::UPDATE_PROFILE,
            delete: client::DELETE,
        },
        _ => Scope {
            create: employee::CREATE,
            login: employee::LOGIN,
            get_one: employee::GET_ONE,
            update_profile: employee::UPDATE_PROFILE,
            delete: employee::DELETE,
        },
    }
}

pub struct UserRepository {
    api: Arc<ApiClient>,
}

impl UserRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create_account(
        &self,
        data: &CreateAccountDTO,
    ) -> Result<CreateAccountResponseDTO, AppError> {
        self.api.post(scope(data.role).create, data).await
    }

    pub async fn login(&self, data: &LoginDTO) -> Result<LoginResponseDTO, AppError> {
        self.api.post(scope(data.role).login, data).await
    }

    pub async fn read_profile(&self, role: Role, id: &i32) -> Result<Option<UserProfile>, AppError> {
        self.api
            .get_optional(&with_id(scope(role).get_one, *id))
            .await
    }

    pub async fn update_profile(
        &self,
        role: Role,
        id: &i32,
        data: &UpdateUserProfileDTO,
    ) -> Result<(), AppError> {
        self.api
            .post_unit(&with_id(scope(role).update_profile, *id), data)
            .await
    }

    pub async fn delete_account(&self, role: Role, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(scope(role).delete, *id)).await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.api.get(employee::GET_ALL).await
    }

    pub async fn read_employee(&self, id: &i32) -> Result<Option<Employee>, AppError> {
        self.api
            .get_optional(&with_id(employee::GET_ONE, *id))
            .await
    }
}
