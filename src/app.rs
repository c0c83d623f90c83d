// src/app.rs
//! Router composition shared by `main` and the router tests

use axum::{extract::Extension, http::header, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::common::AppState;

/// Plain-text liveness banner served at `/`
async fn root() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "(╯°□°）╯︵ ┻━┻",
    )
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
