//! User accounts
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     username VARCHAR(150) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL,
//!     is_staff BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     last_login_at TIMESTAMPTZ
//! );
//! ```
//!
//! Deleting a user cascades to their artist profile, applications, and
//! through the profile to artworks and exhibitions.
//!
//! # Example
//!
//! ```no_run
//! use opengallery_shared::models::user::{CreateUser, User};
//! # use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! let user = User::create(&pool, CreateUser {
//!     username: "visitor".to_string(),
//!     password_hash: "$argon2id$...".to_string(),
//!     is_staff: false,
//! }).await?;
//!
//! let found = User::find_by_username(&pool, "visitor").await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A gallery account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Login name, unique across accounts
    pub username: String,

    /// Argon2id hash in PHC format
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Staff may review applications and see reports
    pub is_staff: bool,

    pub created_at: DateTime<Utc>,

    /// None until the first successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,

    /// Argon2id hash, never the plaintext password
    pub password_hash: String,

    pub is_staff: bool,
}

impl User {
    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// Fails with a unique violation on `users_username_key` when the
    /// username is taken.
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, is_staff)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, is_staff, created_at, last_login_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.is_staff)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, is_staff, created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Exact, case-sensitive username lookup
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, is_staff, created_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Records a successful login. Returns false if the user is gone.
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Grants or revokes staff rights.
    pub async fn set_staff(pool: &PgPool, id: Uuid, is_staff: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_staff = $2 WHERE id = $1")
            .bind(id)
            .bind(is_staff)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Permanently deletes the account and everything hanging off it.
    ///
    /// Returns false if no such user existed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
