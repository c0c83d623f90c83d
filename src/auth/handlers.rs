//! Authentication handlers

use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::models::{LoginResponse, MessageResponse, OAuthCallbackParams, User, UserSummary};
use super::reconcile::reconcile_user;
use super::token::issue_token;
use crate::common::{safe_email_log, ApiError, AppState};

/// GET /auth/google - Start the OAuth flow
/// Redirects the browser to the provider's consent screen
pub async fn google_oauth_start(Extension(state): Extension<Arc<AppState>>) -> Redirect {
    let provider = state.identity_provider.name();

    match state.identity_provider.authorization_url() {
        Ok(auth_url) => {
            info!(provider = provider, "Redirecting to provider consent screen");
            Redirect::to(&auth_url)
        }
        Err(e) => {
            error!(error = %e, provider = provider, "Failed to generate OAuth URL");
            Redirect::to(&state.config.failure_redirect_url())
        }
    }
}

/// GET /auth/google/callback - Handle the provider redirect
///
/// A declined consent, a missing code or a failed code exchange sends the
/// browser to the client's failure page. Otherwise the profile is reconciled
/// to a local user and a token is returned in the body:
///
/// ```json
/// {
///   "message": "Google authentication successful!",
///   "token": "<jwt>",
///   "user": { "id": "U_...", "displayName": "...", "email": "..." }
/// }
/// ```
pub async fn google_oauth_callback(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<Response, ApiError> {
    let failure = || Redirect::to(&state.config.failure_redirect_url()).into_response();

    if let Some(oauth_error) = params.error.as_deref() {
        warn!(oauth_error = %oauth_error, "Provider returned an error on callback");
        return Ok(failure());
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        warn!("No authorization code in OAuth callback");
        return Ok(failure());
    };

    let profile = match state.identity_provider.exchange_code(code).await {
        Ok(profile) => profile,
        Err(e) => {
            error!(
                error = %e,
                provider = state.identity_provider.name(),
                "Failed to exchange authorization code"
            );
            return Ok(failure());
        }
    };

    let user = reconcile_user(&state.user_service, &profile).await?;
    let token = issue_token(&state.config.jwt_secret, &user.id)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        provider = state.identity_provider.name(),
        "User authentication successful via OAuth"
    );

    let body = LoginResponse {
        message: "Google authentication successful!".to_string(),
        token,
        user: UserSummary::from(&user),
    };

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET /auth/failed
/// Landing route for a failed provider handshake
pub async fn google_oauth_failed() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(MessageResponse {
            message: "Google authentication failed. Please try again.".to_string(),
        }),
    )
}

/// GET /auth/logout
/// Tokens are stateless, so there is nothing to clear server-side; the
/// client is expected to drop its token.
pub async fn logout_handler() -> Json<MessageResponse> {
    info!("Logout acknowledged");
    Json(MessageResponse {
        message: "Logged out successfully. Client should clear the token.".to_string(),
    })
}

/// GET /auth/profile
/// Returns the stored record of the user the bearer token belongs to
pub async fn profile_handler(authed: AuthedUser) -> Json<User> {
    Json(authed.user)
}
