//! # User Repository
//!
//! Cashier accounts. The API only reads them; the seed tool creates them.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::credentials;
use crate::error::{DbError, DbResult};
use till_core::validation::{validate_password, validate_username};
use till_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks up a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Creates a user, hashing the password with argon2.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - username already taken
    pub async fn create(&self, username: &str, password: &str) -> DbResult<User> {
        validate_username(username).map_err(till_core::CoreError::from)?;
        validate_password(password).map_err(till_core::CoreError::from)?;

        let username = username.trim();
        debug!(username = %username, "Creating user");

        let password_hash = credentials::hash_password_blocking(password.to_string()).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: username.to_string(),
            },
            other => other,
        })?;

        let id = result.last_insert_rowid();

        self.find_by_username(username)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Counts accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
