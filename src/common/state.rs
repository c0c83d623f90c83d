// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::common::AppConfig;
use crate::services::UserService;

/// Application state containing services and configuration
///
/// Every field is either immutable or internally synchronized, so handlers
/// share it through a plain `Arc` without a lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_service: Arc<UserService>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        config: Arc<AppConfig>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config,
            user_service: Arc::new(UserService::new(db)),
            identity_provider,
        }
    }
}
