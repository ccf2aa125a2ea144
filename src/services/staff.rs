//! Staff services - Livelli accademici e codici di registrazione dei funzionari
//!
//! La lista dei livelli accademici serve anche al form di registrazione, quindi
//! è leggibile da tutti. I codici di validazione li vede solo un gerente.

use crate::core::{AppError, AppState, Confirmation, QueryKey, require_role};
use crate::dtos::{AcademicLevelDTO, ValidationCodeDTO};
use crate::entities::{AcademicLevel, CurrentUser, Role, ValidationCode};
use crate::repositories::{Create, Delete, ReadAll, Update};
use crate::services::catalog::managed;
use tracing::{info, instrument};
use validator::Validate;

// ********************* LIVELLI ACCADEMICI **********************//

#[instrument(skip(state))]
pub async fn list_academic_levels(state: &AppState) -> Result<Vec<AcademicLevel>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::AcademicLevels, || state.academic_level.read_all())
        .await
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id, name = %dto.name))]
pub async fn create_academic_level(
    state: &AppState,
    actor: &CurrentUser,
    dto: &AcademicLevelDTO,
) -> Result<AcademicLevel, AppError> {
    let op = async {
        dto.validate()?;
        let created = state.academic_level.create(dto).await?;
        info!(academic_level_id = created.id, "Academic level created");
        Ok::<_, AppError>(created)
    };
    let result = managed(
        state,
        actor,
        "academic-level-create".into(),
        &[QueryKey::AcademicLevels],
        op,
    )
    .await;
    state.report(result, "Nível acadêmico", "Nível acadêmico criado com sucesso!")
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id))]
pub async fn update_academic_level(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    dto: &AcademicLevelDTO,
) -> Result<AcademicLevel, AppError> {
    let op = async {
        dto.validate()?;
        let updated = state.academic_level.update(&id, dto).await?;
        info!("Academic level updated");
        Ok::<_, AppError>(updated)
    };
    let result = managed(
        state,
        actor,
        format!("academic-level-{}", id),
        &[QueryKey::AcademicLevels],
        op,
    )
    .await;
    state.report(result, "Nível acadêmico", "Nível acadêmico atualizado com sucesso!")
}

#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn delete_academic_level(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let op = async {
        state.academic_level.delete(&id).await?;
        info!("Academic level deleted");
        Ok::<_, AppError>(true)
    };
    let result = managed(
        state,
        actor,
        format!("academic-level-{}", id),
        &[QueryKey::AcademicLevels],
        op,
    )
    .await;
    state.report(result, "Nível acadêmico", "Nível acadêmico excluído com sucesso!")
}

// ********************* CODICI DI VALIDAZIONE **********************//

#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn list_validation_codes(
    state: &AppState,
    actor: &CurrentUser,
) -> Result<Vec<ValidationCode>, AppError> {
    require_role(actor, &[Role::Manager])?;
    state
        .cache
        .get_or_fetch(QueryKey::ValidationCodes, || state.validation_code.read_all())
        .await
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id))]
pub async fn create_validation_code(
    state: &AppState,
    actor: &CurrentUser,
    dto: &ValidationCodeDTO,
) -> Result<ValidationCode, AppError> {
    let op = async {
        dto.validate()?;
        let created = state.validation_code.create(dto).await?;
        info!(code_id = created.id, "Validation code created");
        Ok::<_, AppError>(created)
    };
    let result = managed(
        state,
        actor,
        "validation-code-create".into(),
        &[QueryKey::ValidationCodes],
        op,
    )
    .await;
    state.report(result, "Código de validação", "Código criado com sucesso!")
}

#[instrument(skip(state, actor, dto), fields(user_id = actor.id))]
pub async fn update_validation_code(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    dto: &ValidationCodeDTO,
) -> Result<ValidationCode, AppError> {
    let op = async {
        dto.validate()?;
        let updated = state.validation_code.update(&id, dto).await?;
        info!("Validation code updated");
        Ok::<_, AppError>(updated)
    };
    let result = managed(
        state,
        actor,
        format!("validation-code-{}", id),
        &[QueryKey::ValidationCodes],
        op,
    )
    .await;
    state.report(result, "Código de validação", "Código atualizado com sucesso!")
}

#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn delete_validation_code(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let op = async {
        state.validation_code.delete(&id).await?;
        info!("Validation code deleted");
        Ok::<_, AppError>(true)
    };
    let result = managed(
        state,
        actor,
        format!("validation-code-{}", id),
        &[QueryKey::ValidationCodes],
        op,
    )
    .await;
    state.report(result, "Código de validação", "Código excluído com sucesso!")
}
