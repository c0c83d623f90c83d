// src/services/google.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::auth::{ExternalProfile, IdentityProvider, ProviderError};
use crate::common::{safe_email_log, AppConfig};

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Scopes requested on the consent screen: basic profile and email address
const SCOPES: [&str; 2] = ["profile", "email"];

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OpenID userinfo payload
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
}

impl From<GoogleUserInfo> for ExternalProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider_id: info.sub,
            display_name: info.name,
            given_name: info.given_name,
            family_name: info.family_name,
            emails: info.email.into_iter().collect(),
        }
    }
}

/// Google OAuth2 authorization-code flow
#[derive(Debug, Clone)]
pub struct GoogleService {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: String,
    client: Client,
}

impl GoogleService {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_callback_url.clone(),
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), ProviderError> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            _ => Err(ProviderError::NotConfigured),
        }
    }

    /// Trade the authorization code for an access token
    async fn fetch_access_token(&self, code: &str) -> Result<String, ProviderError> {
        let (client_id, client_secret) = self.credentials()?;

        let params = [
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(ProviderError::OAuthFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let token_response = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;

        Ok(token_response.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, ProviderError> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Userinfo request failed");
            return Err(ProviderError::RequestFailed(format!(
                "userinfo returned HTTP {}",
                status
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| ProviderError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for GoogleService {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self) -> Result<String, ProviderError> {
        let (client_id, _) = self.credentials()?;
        let scope_param = SCOPES.join(" ");

        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            AUTHORIZATION_ENDPOINT,
            urlencoding::encode(client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&scope_param)
        );

        debug!("Generated Google OAuth authorization URL with scopes: {}", scope_param);
        Ok(auth_url)
    }

    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, ProviderError> {
        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_user_info(&access_token).await?;

        info!(
            provider_id = %info.sub,
            email = %info.email.as_deref().map(safe_email_log).unwrap_or_default(),
            "Fetched Google profile"
        );

        Ok(info.into())
    }
}
