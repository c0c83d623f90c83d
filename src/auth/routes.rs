//! Authentication routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /auth/google` - Redirect to the Google consent screen
/// - `GET /auth/google/callback` - Provider callback, issues a JWT
/// - `GET /auth/failed` - Failed handshake landing route
/// - `GET /auth/logout` - Logout acknowledgment (client drops the token)
/// - `GET /auth/profile` - Current user, requires a bearer token
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/google", get(handlers::google_oauth_start))
        .route("/auth/google/callback", get(handlers::google_oauth_callback))
        .route("/auth/failed", get(handlers::google_oauth_failed))
        .route("/auth/logout", get(handlers::logout_handler))
        .route("/auth/profile", get(handlers::profile_handler))
}
