use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err("Invalid API_BASE_URL: must start with http:// or https://".to_string());
        }

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid REQUEST_TIMEOUT_SECS: must be a positive number".to_string())?;

        let session_file = env::var("SESSION_FILE")
            .unwrap_or_else(|_| ".salon-session.json".to_string());

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
            session_file: PathBuf::from(session_file),
            app_env,
        })
    }

    /// Configurazione puntata su un'API specifica, usata dai test e dagli strumenti
    pub fn for_api(api_base_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        let api_base_url: String = api_base_url.into();
        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(20),
            session_file: session_file.into(),
            app_env: "test".to_string(),
        }
    }

    pub fn log_info(&self) {
        info!(
            environment = %self.app_env,
            api = %self.api_base_url,
            timeout_secs = self.request_timeout.as_secs(),
            session_file = %self.session_file.display(),
            "Client configuration loaded"
        );
    }
}
