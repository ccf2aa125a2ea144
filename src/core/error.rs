use crate::core::notify::{Notification, NotificationLevel};
use reqwest::StatusCode;
use std::fmt;

/// Tassonomia degli errori come la vede l'utente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Validazione lato client (form, orario non disponibile), nessuna chiamata fatta
    Validation,
    /// Ruolo o identità non ammessi per l'operazione, nessuna chiamata fatta
    AccessDenied,
    NotFound,
    /// Un'operazione identica è già in corso
    Conflict,
    /// Risposta 4xx/5xx dall'API
    Api,
    /// Errore di trasporto o timeout
    Network,
    /// Flusso a più passi rimasto a metà
    PartialFailure,
    Internal,
}

#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    status: Option<StatusCode>,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            status: None,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    // Common error constructors
    pub fn validation(message: &'static str) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn access_denied(message: &'static str) -> Self {
        Self::new(ErrorKind::AccessDenied, message)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(ErrorKind::NotFound, message).with_status(StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn api(status: StatusCode) -> Self {
        Self::new(ErrorKind::Api, "O servidor recusou o pedido").with_status(status)
    }

    pub fn network(message: &'static str) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn partial_failure(message: &'static str) -> Self {
        Self::new(ErrorKind::PartialFailure, message)
    }

    pub fn internal(message: &'static str) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Titolo del toast in base al tipo di errore
    fn title(&self) -> &'static str {
        match self.kind {
            ErrorKind::Validation => "Erro de Validação",
            ErrorKind::AccessDenied => "Acesso negado",
            ErrorKind::NotFound => "Não encontrado",
            ErrorKind::Conflict => "Operação em andamento",
            ErrorKind::Api | ErrorKind::Network | ErrorKind::Internal => "Erro",
            ErrorKind::PartialFailure => "Operação incompleta",
        }
    }

    /// Toast da mostrare all'utente per questo errore
    pub fn to_notification(&self) -> Notification {
        let level = match self.kind {
            ErrorKind::AccessDenied | ErrorKind::Conflict | ErrorKind::PartialFailure => {
                NotificationLevel::Warning
            }
            _ => NotificationLevel::Error,
        };
        Notification::new(level, self.title(), self.message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if let Some(status) = self.status {
            write!(f, " ({})", status)?;
        }
        if let Some(details) = &self.details {
            write!(f, " - {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::network("O servidor demorou demasiado a responder")
                .with_details(err.to_string());
        }

        if err.is_decode() {
            return Self::internal("Resposta inesperada do servidor").with_details(err.to_string());
        }

        match err.status() {
            Some(StatusCode::NOT_FOUND) => Self::not_found("Recurso não encontrado"),
            Some(status) => Self::api(status).with_details(err.to_string()),
            None => Self::network("Não foi possível contactar o servidor")
                .with_details(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::validation("Por favor, verifique todos os campos").with_details(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal("Resposta inesperada do servidor").with_details(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal("Falha ao aceder à sessão local").with_details(err.to_string())
    }
}
