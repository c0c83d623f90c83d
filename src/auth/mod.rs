//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Google OAuth login through the `IdentityProvider` seam
//! - Reconciling provider profiles with local user records
//! - JWT token issuance and validation
//! - AuthedUser extractor for protected routes

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod reconcile;
pub mod routes;
pub mod token;


pub use error::AuthError;
pub use models::User;
pub use provider::{ExternalProfile, IdentityProvider, ProviderError};
pub use routes::auth_routes;
