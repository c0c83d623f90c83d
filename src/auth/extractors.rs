//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::AuthError;
use super::models::User;
use super::token::{extract_bearer_token, verify_token};
use crate::common::{safe_email_log, safe_token_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Requires `Authorization: Bearer <token>`, checks the token's signature and
/// expiry, then loads the user it names. Handlers taking an `AuthedUser` only
/// run once all three steps succeed; any failure is a 401 whose message and
/// code say which step failed.
#[derive(Debug)]
pub struct AuthedUser {
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<Arc<AppState>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let header = match parts.headers.get(AUTHORIZATION) {
            None => None,
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Authentication failed: non-ASCII Authorization header");
                AuthError::MalformedHeader
            })?),
        };

        let token = extract_bearer_token(header).map_err(|e| {
            warn!(reason = e.code(), "Authentication failed: bad Authorization header");
            e
        })?;

        let claims = verify_token(&app_state.config.jwt_secret, token).map_err(|e| {
            warn!(
                reason = e.code(),
                token = %safe_token_log(token),
                "Authentication failed: token rejected"
            );
            e
        })?;

        match app_state.user_service.find_by_id(&claims.id).await? {
            Some(user) => {
                debug!(
                    user_id = %user.id,
                    email = %safe_email_log(&user.email),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser { user })
            }
            None => {
                warn!(user_id = %claims.id, "Authentication failed: user not found in database");
                Err(AuthError::UserNotFound.into())
            }
        }
    }
}
