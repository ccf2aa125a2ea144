//! Auth - Sessione persistita, lettura del JWT e controlli di accesso
//!
//! I controlli qui sono solo lato client: l'API resta l'autorità. Servono a non
//! inviare chiamate che l'utente corrente non ha diritto di fare.

use crate::core::AppError;
use crate::entities::{CurrentUser, Role};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Utente autenticato e token da inviare come `Authorization: Bearer`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    #[serde(rename = "userInfo")]
    pub user: CurrentUser,
    pub token: String,
}

/// File JSON chiave-valore con `userInfo` e `token`
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` se non c'è nessuna sessione salvata o se il file è illeggibile
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Option<Session>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!("No persisted session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!(user_id = session.user.id, "Persisted session loaded");
                Ok(Some(session))
            }
            Err(e) => {
                warn!("Discarding unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, session), fields(path = %self.path.display(), user_id = session.user.id))]
    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, raw).await?;
        debug!("Session persisted");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Persisted credentials removed");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// struct che decodifica il contenuto del token jwt emesso dall'API
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub exp: Option<i64>, // Expiry time of the token
    #[serde(default)]
    pub iat: Option<i64>, // Issued at time of the token
}

impl Claims {
    pub fn is_expired(&self) -> bool {
        self.exp
            .map(|exp| exp <= Utc::now().timestamp())
            .unwrap_or(false)
    }
}

/// Legge i claim del token senza verificarne la firma.
/// Il client non conosce il segreto: la firma la verifica l'API.
#[instrument(skip(token))]
pub fn decode_claims(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("Failed to decode JWT token: {:?}", e);
            AppError::internal("Token de sessão inválido").with_details(e.to_string())
        })
}

/// Risposta esplicita a una finestra di conferma
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Dismissed,
}

/// Helper function per verificare che l'utente abbia uno dei ruoli richiesti
///
/// # Arguments
/// * `actor` - L'utente che vuole eseguire l'operazione
/// * `allowed_roles` - Lista di ruoli permessi
///
/// # Returns
/// * `Ok(())` se il ruolo è permesso
/// * `Err(AppError)` di tipo access-denied altrimenti
#[instrument(skip(actor), fields(user_id = actor.id))]
pub fn require_role(actor: &CurrentUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !allowed_roles.contains(&actor.role) {
        warn!(
            "User {} has insufficient role {:?}, required one of: {:?}",
            actor.id, actor.role, allowed_roles
        );
        return Err(
            AppError::access_denied("Você não tem permissão para esta operação").with_details(
                format!(
                    "This action requires one of the following roles: {:?}",
                    allowed_roles
                ),
            ),
        );
    }

    debug!("Role check passed for user {} with role {:?}", actor.id, actor.role);
    Ok(())
}

/// Vero per un gerente, oppure quando l'attore è esattamente il soggetto (stesso id e stesso ruolo)
pub fn can_manage(target_id: i32, target_role: Role, actor: &CurrentUser) -> bool {
    actor.role == Role::Manager || (target_role == actor.role && target_id == actor.id)
}

pub fn ensure_can_manage(target_id: i32, target_role: Role, actor: &CurrentUser) -> Result<(), AppError> {
    if can_manage(target_id, target_role, actor) {
        return Ok(());
    }

    warn!(
        "User {} ({:?}) cannot manage {:?} {}",
        actor.id, actor.role, target_role, target_id
    );
    Err(AppError::access_denied("Você não tem permissão para esta operação")
        .with_details(format!("target {} {}", target_role, target_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn user(id: i32, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            username: "teste".into(),
            email: "teste@mail.ao".into(),
            cellphone: "923000000".into(),
            role,
            academic_level_id: None,
        }
    }

    #[test]
    fn test_can_manage_examples() {
        assert!(can_manage(5, Role::Client, &user(5, Role::Client)));
        assert!(!can_manage(5, Role::Client, &user(6, Role::Client)));
        assert!(can_manage(5, Role::Client, &user(1, Role::Manager)));
        assert!(!can_manage(5, Role::Employee, &user(5, Role::Client)));
    }

    #[test]
    fn test_unknown_role_has_no_rights() {
        let actor = user(9, Role::Unknown);
        assert!(!can_manage(9, Role::Client, &actor));
        assert!(require_role(&actor, &[Role::Client, Role::Employee, Role::Manager]).is_err());
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&user(1, Role::Manager), &[Role::Manager]).is_ok());
        let err = require_role(&user(1, Role::Employee), &[Role::Manager]).unwrap_err();
        assert_eq!(err.kind(), crate::core::ErrorKind::AccessDenied);
    }

    #[test]
    fn test_decode_claims_without_secret() {
        #[derive(Serialize)]
        struct Minted {
            exp: i64,
            id: i32,
        }

        let past = Utc::now().timestamp() - 60;
        let token = encode(
            &Header::default(),
            &Minted { exp: past, id: 3 },
            &EncodingKey::from_secret(b"server-only"),
        )
        .unwrap();

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(past));
        assert!(claims.is_expired());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_claims("not-a-jwt").is_err());
    }
}
