//! Catalog services - Categorie, servizi e funzionari
//!
//! Le letture sono aperte a tutti e passano dalla cache. Le mutazioni sono
//! riservate ai gerenti e invalidano le liste corrispondenti.

use crate::core::{AppError, AppState, Confirmation, QueryKey, require_role};
use crate::dtos::{CreateCategoryDTO, CreateServiceDTO, UpdateCategoryDTO, UpdateServiceDTO};
use crate::entities::{Category, CurrentUser, Employee, Role, Service};
use crate::repositories::{Create, Delete, Read, ReadAll, Update};
use std::future::Future;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Esegue `op` solo per un gerente, con guardia contro i doppi invii,
/// e invalida `keys` se va a buon fine
pub(crate) async fn managed<T, Fut>(
    state: &AppState,
    actor: &CurrentUser,
    pending_key: String,
    keys: &[QueryKey],
    op: Fut,
) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    require_role(actor, &[Role::Manager])?;
    let _guard = state.in_flight.begin(pending_key)?;

    let value = op.await?;
    state.cache.invalidate_many(keys);
    Ok(value)
}

// ********************* CATEGORIE **********************//

#[instrument(skip(state))]
pub async fn list_categories(state: &AppState) -> Result<Vec<Category>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Categories, || state.category.read_all())
        .await
}

#[instrument(skip(state))]
pub async fn get_category(state: &AppState, id: i32) -> Result<Category, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Category(id), || async {
            state
                .category
                .read(&id)
                .await?
                .ok_or_else(|| AppError::not_found("Categoria não encontrada"))
        })
        .await
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id, name = %dto.name))]
pub async fn create_category(
    state: &AppState,
    actor: &CurrentUser,
    dto: &CreateCategoryDTO,
) -> Result<Category, AppError> {
    let op = async {
        dto.validate()?;
        let created = state.category.create(dto).await?;
        info!(category_id = created.id, "Category created");
        Ok::<_, AppError>(created)
    };
    let keys = [QueryKey::Categories, QueryKey::Services];
    let result = managed(state, actor, "category-create".into(), &keys, op).await;
    state.report(result, "Categoria", "Categoria criada com sucesso!")
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id, category_id = dto.id))]
pub async fn update_category(
    state: &AppState,
    actor: &CurrentUser,
    dto: &UpdateCategoryDTO,
) -> Result<Category, AppError> {
    let op = async {
        dto.validate()?;
        let updated = state.category.update(&dto.id, dto).await?;
        info!("Category updated");
        Ok::<_, AppError>(updated)
    };
    let keys = [QueryKey::Categories, QueryKey::Category(dto.id)];
    let result = managed(state, actor, format!("category-{}", dto.id), &keys, op).await;
    state.report(result, "Categoria", "Categoria atualizada com sucesso!")
}

/// La cancellazione a cascata dei servizi è compito del server
#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn delete_category(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let op = async {
        state.category.delete(&id).await?;
        info!("Category deleted");
        Ok::<_, AppError>(true)
    };
    let keys = [QueryKey::Categories, QueryKey::Category(id), QueryKey::Services];
    let result = managed(state, actor, format!("category-{}", id), &keys, op).await;
    state.report(result, "Categoria", "Categoria excluída com sucesso!")
}

// ********************* SERVIZI **********************//

#[instrument(skip(state))]
pub async fn list_services(state: &AppState) -> Result<Vec<Service>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Services, || state.service.read_all())
        .await
}

#[instrument(skip(state))]
pub async fn get_service(state: &AppState, id: i32) -> Result<Service, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Service(id), || async {
            state
                .service
                .read(&id)
                .await?
                .ok_or_else(|| AppError::not_found("Serviço não encontrado"))
        })
        .await
}

fn service_keys(service_id: Option<i32>, category_id: i32) -> Vec<QueryKey> {
    let mut keys = vec![
        QueryKey::Services,
        QueryKey::Categories,
        QueryKey::Category(category_id),
    ];
    keys.extend(service_id.map(QueryKey::Service));
    keys
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id, name = %dto.name))]
pub async fn create_service(
    state: &AppState,
    actor: &CurrentUser,
    dto: &CreateServiceDTO,
) -> Result<Service, AppError> {
    debug!(with_photo = dto.photo.is_some(), "Creating service");
    let op = async {
        dto.validate()?;
        let created = state.service.create(dto).await?;
        info!(service_id = created.id, "Service created");
        Ok::<_, AppError>(created)
    };
    let keys = service_keys(None, dto.category_id);
    let result = managed(state, actor, "service-create".into(), &keys, op).await;
    state.report(result, "Serviço", "Serviço criado com sucesso!")
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id, service_id = dto.id))]
pub async fn update_service(
    state: &AppState,
    actor: &CurrentUser,
    dto: &UpdateServiceDTO,
) -> Result<Service, AppError> {
    let op = async {
        dto.validate()?;
        let updated = state.service.update(&dto.id, dto).await?;
        info!("Service updated");
        Ok::<_, AppError>(updated)
    };
    let keys = service_keys(Some(dto.id), dto.category_id);
    let result = managed(state, actor, format!("service-{}", dto.id), &keys, op).await;
    state.report(result, "Serviço", "Serviço atualizado com sucesso!")
}

#[instrument(skip(state, actor, service), fields(user_id = actor.id, service_id = service.id))]
pub async fn delete_service(
    state: &AppState,
    actor: &CurrentUser,
    service: &Service,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let op = async {
        state.service.delete(&service.id).await?;
        info!("Service deleted");
        Ok::<_, AppError>(true)
    };
    let mut keys = vec![QueryKey::Services, QueryKey::Categories, QueryKey::Service(service.id)];
    keys.extend(service.category_id.map(QueryKey::Category));
    let result = managed(state, actor, format!("service-{}", service.id), &keys, op).await;
    state.report(result, "Serviço", "Serviço excluído com sucesso!")
}

// ********************* FUNZIONARI **********************//

#[instrument(skip(state))]
pub async fn list_employees(state: &AppState) -> Result<Vec<Employee>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Employees, || state.user.list_employees())
        .await
}

#[instrument(skip(state))]
pub async fn get_employee(state: &AppState, id: i32) -> Result<Employee, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Employee(id), || async {
            state
                .user
                .read_employee(&id)
                .await?
                .ok_or_else(|| AppError::not_found("Funcionário não encontrado"))
        })
        .await
}
