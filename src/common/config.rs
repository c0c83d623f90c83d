// Application configuration loaded once at startup

use std::env;
use thiserror::Error;

/// Path (relative to the client base URL) the OAuth flow falls back to on failure
const FAILURE_REDIRECT_PATH: &str = "/login?error=google_auth_failed";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Immutable process-wide configuration
///
/// Built from the environment in `main` and shared behind an `Arc` through
/// `AppState`; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub reset_db: bool,
    pub jwt_secret: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub api_url: String,
    pub google_callback_url: String,
    pub client_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 5000,
        };

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let api_url = get("API_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let google_callback_url = get("GOOGLE_OAUTH_REDIRECT_URI")
            .unwrap_or_else(|| format!("{}/auth/google/callback", api_url));

        let client_url = get("CLIENT_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://darthtator.db".to_string()),
            reset_db: get("RESET_DB").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            jwt_secret,
            google_client_id: get("GOOGLE_CLIENT_ID"),
            google_client_secret: get("GOOGLE_CLIENT_SECRET"),
            api_url,
            google_callback_url,
            client_url,
        })
    }

    /// Where the browser is sent when the provider declines or the handshake fails
    pub fn failure_redirect_url(&self) -> String {
        format!("{}{}", self.client_url, FAILURE_REDIRECT_PATH)
    }
}
