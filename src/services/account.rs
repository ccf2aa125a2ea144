//! Account services - Registrazione, login, sessione e profilo utente

use crate::core::{
    AppError, AppState, Confirmation, QueryKey, Session, decode_claims, ensure_can_manage,
};
use crate::dtos::{CreateAccountDTO, CreateAccountResponseDTO, LoginDTO, UpdateUserProfileDTO};
use crate::entities::{CurrentUser, Role, UserProfile};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, dto), fields(username = %dto.username, role = %dto.role))]
pub async fn create_account(
    state: &AppState,
    dto: &CreateAccountDTO,
) -> Result<CreateAccountResponseDTO, AppError> {
    debug!("Creating account");
    let result: Result<CreateAccountResponseDTO, AppError> = async {
        // 1. Validare il form (email, password e conferma, telefono, codice del funzionario)
        // 2. Inviare a /client/create o /employee/create a seconda del ruolo

        dto.validate()?;
        let _guard = state.in_flight.begin(format!("account-create-{}", dto.email))?;

        let created = state.user.create_account(dto).await?;
        info!("Account created");
        if dto.role != Role::Client {
            state.cache.invalidate(&QueryKey::Employees);
        }
        Ok(created)
    }
    .await;

    state.report(result, "Cadastro", "Conta criada com sucesso!")
}

#[instrument(skip(state, dto), fields(email = %dto.email, role = %dto.role))]
pub async fn login(state: &AppState, dto: &LoginDTO) -> Result<Session, AppError> {
    debug!("Logging in");
    let result: Result<Session, AppError> = async {
        // 1. Validare email e password
        // 2. Autenticarsi sulla rotta del ruolo
        // 3. Installare il token sul trasporto e persistere la sessione

        dto.validate()?;
        let _guard = state.in_flight.begin("login")?;

        let response = state.user.login(dto).await?;
        let session = Session {
            user: response.user,
            token: response.token,
        };

        state.session_store.save(&session).await?;
        state.set_session(Some(session.clone()));

        info!(user_id = session.user.id, "User logged in");
        Ok(session)
    }
    .await;

    state.report(result, "Login", "Login realizado com sucesso!")
}

/// Ripristina la sessione salvata. Un token scaduto viene scartato insieme al file.
#[instrument(skip(state))]
pub async fn restore_session(state: &AppState) -> Result<Option<CurrentUser>, AppError> {
    let Some(session) = state.session_store.load().await? else {
        return Ok(None);
    };

    let expired = match decode_claims(&session.token) {
        Ok(claims) => claims.is_expired(),
        Err(_) => true,
    };

    if expired {
        warn!(user_id = session.user.id, "Persisted token is no longer valid, discarding");
        state.session_store.clear().await?;
        return Ok(None);
    }

    info!(user_id = session.user.id, "Session restored");
    let user = session.user.clone();
    state.set_session(Some(session));
    Ok(Some(user))
}

/// Cancella le credenziali persistite, il token, la cache e il dialogo aperto
#[instrument(skip(state))]
pub async fn logout(state: &AppState) -> Result<(), AppError> {
    state.set_session(None);
    state.cache.clear();
    state.ui.reset();
    state.session_store.clear().await?;
    info!("User logged out");
    Ok(())
}

#[instrument(skip(state))]
pub async fn get_profile(state: &AppState, role: Role, id: i32) -> Result<UserProfile, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::UserProfile { role, id }, || async {
            state
                .user
                .read_profile(role, &id)
                .await?
                .ok_or_else(|| AppError::not_found("Usuário não encontrado"))
        })
        .await
}

/// Aggiorna il profilo di `target_id`/`target_role`. Un auto-aggiornamento
/// riscrive anche l'identità persistita.
#[instrument(skip(state, actor, dto), fields(user_id = actor.id))]
pub async fn update_profile(
    state: &AppState,
    actor: &CurrentUser,
    target_role: Role,
    target_id: i32,
    dto: &UpdateUserProfileDTO,
) -> Result<(), AppError> {
    let result: Result<(), AppError> = async {
        ensure_can_manage(target_id, target_role, actor)?;
        dto.validate()?;

        let _guard = state
            .in_flight
            .begin(format!("profile-{}-{}", target_role, target_id))?;

        state.user.update_profile(target_role, &target_id, dto).await?;
        state.cache.invalidate(&QueryKey::UserProfile {
            role: target_role,
            id: target_id,
        });
        if target_role != Role::Client {
            state.cache.invalidate_many(&[QueryKey::Employees, QueryKey::Employee(target_id)]);
        }

        if target_role == actor.role && target_id == actor.id {
            if let Some(mut session) = state.session() {
                apply_profile_changes(&mut session.user, dto);
                state.session_store.save(&session).await?;
                state.set_session(Some(session));
            }
        }

        info!("Profile updated");
        Ok(())
    }
    .await;

    state.report(result, "Atualização de perfil", "Perfil atualizado com sucesso!")
}

fn apply_profile_changes(user: &mut CurrentUser, dto: &UpdateUserProfileDTO) {
    if let Some(username) = &dto.username {
        user.username = username.clone();
    }
    if let Some(email) = &dto.email {
        user.email = email.clone();
    }
    if let Some(cellphone) = &dto.cellphone {
        user.cellphone = cellphone.clone();
    }
}

/// Cancella un account. Cancellare il proprio account esegue anche il logout.
#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn delete_account(
    state: &AppState,
    actor: &CurrentUser,
    target_role: Role,
    target_id: i32,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let result: Result<bool, AppError> = async {
        ensure_can_manage(target_id, target_role, actor)?;
        let _guard = state
            .in_flight
            .begin(format!("profile-{}-{}", target_role, target_id))?;

        state.user.delete_account(target_role, &target_id).await?;
        info!(%target_role, target_id, "Account deleted");

        if target_role == actor.role && target_id == actor.id {
            // l'account non esiste più: un errore locale non annulla la cancellazione
            if let Err(e) = logout(state).await {
                warn!(target_id, "Account deleted but local session cleanup failed: {}", e);
            }
        } else {
            state.cache.invalidate(&QueryKey::UserProfile {
                role: target_role,
                id: target_id,
            });
            if target_role != Role::Client {
                state.cache.invalidate_many(&[QueryKey::Employees, QueryKey::Employee(target_id)]);
            }
        }
        Ok(true)
    }
    .await;

    state.report(result, "Conta", "Conta excluída com sucesso!")
}
