//! ApiClient - Trasporto HTTP verso l'API REST del salone
//!
//! Si occupa solo del trasporto: costruzione degli URL, token bearer, timeout,
//! mappatura degli status HTTP in `AppError` e decodifica del JSON.

use crate::core::AppError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::internal("Não foi possível preparar o cliente HTTP").with_details(e.to_string())
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Imposta (o rimuove) il token inviato come `Authorization: Bearer`
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        // concatenazione e non Url::join, che scarterebbe un eventuale prefisso del base url
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            AppError::internal("Endereço da API inválido").with_details(format!("{}: {}", path, e))
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let builder = self.client.request(method, self.url(path)?);
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, body))
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        debug!("GET");
        let response = self.send(self.request(Method::GET, path)?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Come [`ApiClient::get`], ma un 404 significa "assente"
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        debug!("GET (optional)");
        match self.send(self.request(Method::GET, path)?).await {
            Ok(response) => Ok(Some(response.json::<T>().await?)),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST");
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(response.json::<T>().await?)
    }

    /// POST di cui interessa solo l'esito, il corpo della risposta viene scartato
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), AppError>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST");
        self.send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        debug!("DELETE");
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}

fn map_status_error(status: StatusCode, body: String) -> AppError {
    warn!(status = %status, "API answered with an error");
    let error = match status {
        StatusCode::NOT_FOUND => AppError::not_found("Recurso não encontrado"),
        _ => AppError::api(status),
    };

    if body.is_empty() {
        error
    } else {
        error.with_details(body)
    }
}
