//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
///
/// `id` is the user's internal identifier; `iat`/`exp` are unix seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub id: String,
    pub iat: usize,
    pub exp: usize,
}

/// User database model
///
/// Serialized in the camelCase shape clients of `/auth/profile` expect.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub google_id: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: String,
}

/// Minimal user projection returned alongside a freshly issued token
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub display_name: Option<String>,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Body of a successful OAuth callback
#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Generic `{ "message": ... }` body
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string Google appends when redirecting back to the callback
#[derive(Deserialize, Debug, Default)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}
