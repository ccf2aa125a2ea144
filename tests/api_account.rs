//! Integration tests per account e sessione
//!
//! Test per:
//! - login e persistenza della sessione
//! - ripristino della sessione e scarto dei token scaduti
//! - logout
//! - aggiornamento e cancellazione del profilo

mod common;

#[cfg(test)]
mod account_tests {
    use super::common::*;
    use chrono::Duration;
    use salon_booking::ErrorKind;
    use salon_booking::core::{Confirmation, Dialog, QueryKey, Session, SessionStore};
    use salon_booking::dtos::{LoginDTO, UpdateUserProfileDTO};
    use salon_booking::entities::Role;
    use salon_booking::services::{account, catalog};

    fn login_form(password: &str) -> LoginDTO {
        LoginDTO {
            email: "joana@mail.ao".into(),
            password: password.into(),
            role: Role::Client,
        }
    }

    fn persisted(token: String) -> Session {
        Session {
            user: client(),
            token,
        }
    }

    // ============================================================
    // Login
    // ============================================================

    #[tokio::test]
    async fn test_login_persists_session() {
        let ctx = setup(seeded_store()).await;

        let session = account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();

        assert_eq!(session.user.id, CLIENT_ID);
        assert_eq!(session.user.role, Role::Client);
        assert!(ctx.state.api.has_token());
        assert_eq!(ctx.state.current_user().map(|u| u.id), Some(CLIENT_ID));

        let stored = ctx.state.session_store.load().await.unwrap().unwrap();
        assert_eq!(stored.token, session.token);
        assert_eq!(ctx.api.count_requests("POST /client/login"), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_is_an_api_error() {
        let ctx = setup(seeded_store()).await;

        let err = account::login(&ctx.state, &login_form("errada123"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
        assert!(!ctx.state.api.has_token());
        assert!(ctx.state.session_store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_login_form_sends_nothing() {
        let ctx = setup(seeded_store()).await;
        let mut form = login_form(PASSWORD);
        form.email = "joana".into();

        let err = account::login(&ctx.state, &form).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(ctx.api.requests().is_empty());
    }

    // ============================================================
    // Ripristino della sessione
    // ============================================================

    #[tokio::test]
    async fn test_restore_valid_session() {
        let ctx = setup(seeded_store()).await;
        let token = create_test_jwt(CLIENT_ID, Duration::hours(1));
        ctx.state.session_store.save(&persisted(token)).await.unwrap();

        let restored = account::restore_session(&ctx.state).await.unwrap();

        assert_eq!(restored.map(|u| u.id), Some(CLIENT_ID));
        assert!(ctx.state.api.has_token());
    }

    #[tokio::test]
    async fn test_expired_session_is_discarded() {
        let ctx = setup(seeded_store()).await;
        let token = create_test_jwt(CLIENT_ID, Duration::hours(-1));
        ctx.state.session_store.save(&persisted(token)).await.unwrap();

        let restored = account::restore_session(&ctx.state).await.unwrap();

        assert!(restored.is_none());
        assert!(!ctx.state.api.has_token());
        assert!(!ctx.state.session_store.path().exists());
    }

    #[tokio::test]
    async fn test_undecodable_token_is_discarded() {
        let ctx = setup(seeded_store()).await;
        ctx.state
            .session_store
            .save(&persisted("not-a-jwt".into()))
            .await
            .unwrap();

        assert!(account::restore_session(&ctx.state).await.unwrap().is_none());
        assert!(!ctx.state.session_store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupted_session_file_counts_as_logged_out() {
        let ctx = setup(seeded_store()).await;
        std::fs::write(ctx.state.session_store.path(), "{ not json").unwrap();

        assert!(account::restore_session(&ctx.state).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_survives_a_new_state() {
        let ctx = setup(seeded_store()).await;
        account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();

        let reopened = create_test_state(&ctx.api, &ctx.dir);
        let restored = account::restore_session(&reopened).await.unwrap();

        assert_eq!(restored.map(|u| u.username), Some("joana".to_string()));
    }

    // ============================================================
    // Logout
    // ============================================================

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let ctx = setup(seeded_store()).await;
        account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();
        catalog::list_services(&ctx.state).await.unwrap();
        ctx.state.ui.open(Dialog::Cart);

        account::logout(&ctx.state).await.unwrap();

        assert!(!ctx.state.api.has_token());
        assert!(ctx.state.current_user().is_none());
        assert!(!ctx.state.cache.contains(&QueryKey::Services));
        assert_eq!(ctx.state.ui.dialog(), Dialog::None);
        assert!(!ctx.state.session_store.path().exists());

        let store = SessionStore::new(ctx.dir.path().join("session.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    // ============================================================
    // Profilo
    // ============================================================

    #[tokio::test]
    async fn test_get_profile() {
        let ctx = setup(seeded_store()).await;
        ctx.api
            .with_store(|s| s.insert_appointment(90, CLIENT_ID, "PENDING", None));

        let profile = account::get_profile(&ctx.state, Role::Client, CLIENT_ID)
            .await
            .unwrap();

        assert_eq!(profile.username, "joana");
        assert_eq!(profile.appointments.len(), 1);

        let err = account::get_profile(&ctx.state, Role::Client, 404)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_self_update_refreshes_persisted_identity() {
        let ctx = setup(seeded_store()).await;
        let session = account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();
        let dto = UpdateUserProfileDTO {
            username: Some("joana maria".into()),
            ..Default::default()
        };

        account::update_profile(&ctx.state, &session.user, Role::Client, CLIENT_ID, &dto)
            .await
            .unwrap();

        assert_eq!(ctx.state.current_user().unwrap().username, "joana maria");
        let stored = ctx.state.session_store.load().await.unwrap().unwrap();
        assert_eq!(stored.user.username, "joana maria");
        assert_eq!(ctx.api.count_requests("POST /client/updateInfoProfile/3"), 1);
    }

    #[tokio::test]
    async fn test_only_self_or_manager_can_update() {
        let ctx = setup(seeded_store()).await;
        let dto = UpdateUserProfileDTO {
            cellphone: Some("923555666".into()),
            ..Default::default()
        };

        let err = account::update_profile(&ctx.state, &client(), Role::Client, 4, &dto)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);

        // stesso id ma ruolo diverso
        let err = account::update_profile(&ctx.state, &user(EMPLOYEE_ID, Role::Client), Role::Employee, EMPLOYEE_ID, &dto)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(ctx.api.count_requests("updateInfoProfile"), 0);

        account::update_profile(&ctx.state, &manager(), Role::Employee, EMPLOYEE_ID, &dto)
            .await
            .unwrap();
        assert_eq!(ctx.api.count_requests("POST /employee/updateInfoProfile/10"), 1);
    }

    #[tokio::test]
    async fn test_delete_own_account_logs_out() {
        let ctx = setup(seeded_store()).await;
        let session = account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();

        let deleted = account::delete_account(&ctx.state, &session.user, Role::Client, CLIENT_ID, Confirmation::Dismissed)
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(ctx.api.count_requests("DELETE"), 0);

        let deleted = account::delete_account(&ctx.state, &session.user, Role::Client, CLIENT_ID, Confirmation::Confirmed)
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(ctx.api.count_requests("DELETE /client/deleteClient/3"), 1);
        assert!(ctx.state.current_user().is_none());
        assert!(!ctx.state.session_store.path().exists());
    }

    #[tokio::test]
    async fn test_delete_own_account_survives_local_cleanup_failure() {
        let ctx = setup(seeded_store()).await;
        let session = account::login(&ctx.state, &login_form(PASSWORD)).await.unwrap();
        // il file di sessione diventa una cartella: la rimozione fallisce
        let path = ctx.state.session_store.path().to_path_buf();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let deleted = account::delete_account(&ctx.state, &session.user, Role::Client, CLIENT_ID, Confirmation::Confirmed)
            .await
            .unwrap();

        assert!(deleted);
        assert_eq!(ctx.api.count_requests("DELETE /client/deleteClient/3"), 1);
        assert!(ctx.state.current_user().is_none());
        assert!(!ctx.state.api.has_token());
    }
}
