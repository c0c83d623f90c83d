//! External identity provider abstraction
//!
//! Reconciliation only ever sees an `ExternalProfile`, so adding a provider
//! means implementing `IdentityProvider` and nothing else.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("identity provider not configured")]
    NotConfigured,

    #[error("OAuth flow failed: {0}")]
    OAuthFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Identity attributes returned by a provider after a successful handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalProfile {
    /// Stable subject identifier assigned by the provider
    pub provider_id: String,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub emails: Vec<String>,
}

impl ExternalProfile {
    /// First usable email, trimmed and lower-cased
    pub fn primary_email(&self) -> Option<String> {
        self.emails
            .iter()
            .map(|e| e.trim())
            .find(|e| !e.is_empty())
            .map(str::to_lowercase)
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Consent screen URL the browser is redirected to
    fn authorization_url(&self) -> Result<String, ProviderError>;

    /// Exchange the authorization code from the callback for the user's profile
    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, ProviderError>;
}
