// Shared fixtures for unit tests

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use super::migrations::run_migrations;

/// Fresh in-memory database with the real schema
///
/// A single connection that never idles out, since each in-memory SQLite
/// connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");
    run_migrations(&pool, false)
        .await
        .expect("migrations should run");
    pool
}
