// src/services/users.rs
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

use crate::auth::User;
use crate::common::{generate_user_id, safe_email_log, ApiError};

/// Fields of a user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub google_id: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

/// User record store backed by the `users` table
#[derive(Debug, Clone)]
pub struct UserService {
    db_pool: SqlitePool,
}

/// Turn a unique-constraint violation into a 409; everything else stays a database error
fn map_write_error(e: sqlx::Error, context: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            warn!(error = %db_err, context = %context, "Uniqueness conflict on users table");
            return ApiError::Conflict(
                "A user with this email or Google account already exists.".to_string(),
            );
        }
    }
    error!(error = %e, context = %context, "Database error writing user");
    ApiError::DatabaseError(e)
}

impl UserService {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %id, "Database error during user lookup by id");
                ApiError::DatabaseError(e)
            })
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = ?")
            .bind(google_id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    google_id = %google_id,
                    "Database error during user lookup by Google id"
                );
                ApiError::DatabaseError(e)
            })
    }

    /// Case-insensitive lookup by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let email = email.trim().to_lowercase();
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    email = %safe_email_log(&email),
                    "Database error during user lookup by email"
                );
                ApiError::DatabaseError(e)
            })
    }

    /// Insert a user and read the stored row back
    ///
    /// The email is stored lower-cased. A duplicate email or Google id
    /// surfaces as `ApiError::Conflict`.
    pub async fn create(&self, new_user: NewUser) -> Result<User, ApiError> {
        let id = generate_user_id();
        let email = new_user.email.trim().to_lowercase();
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, google_id, display_name, first_name, last_name, email, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(new_user.google_id.as_deref())
        .bind(new_user.display_name.as_deref())
        .bind(new_user.first_name.as_deref())
        .bind(new_user.last_name.as_deref())
        .bind(&email)
        .bind(&created_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| map_write_error(e, "create"))?;

        debug!(user_id = %id, "Inserted user, fetching stored record");
        self.fetch_existing(&id).await
    }

    /// Attach a Google id to an existing user that has none
    ///
    /// The display name is only filled in when the stored one is empty. The
    /// update is guarded on `google_id IS NULL`; if another request linked
    /// the record first, the row is returned unchanged.
    pub async fn link_google_id(
        &self,
        user_id: &str,
        google_id: &str,
        display_name: Option<&str>,
    ) -> Result<User, ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET google_id = ?,
                display_name = COALESCE(NULLIF(display_name, ''), ?)
            WHERE id = ? AND google_id IS NULL
            "#,
        )
        .bind(google_id)
        .bind(display_name)
        .bind(user_id)
        .execute(&self.db_pool)
        .await
        .map_err(|e| map_write_error(e, "link_google_id"))?;

        if result.rows_affected() == 0 {
            warn!(user_id = %user_id, "User already linked to a Google account, leaving as-is");
        }

        self.fetch_existing(user_id).await
    }

    async fn fetch_existing(&self, id: &str) -> Result<User, ApiError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
    }
}
