/// User model and database operations
///
/// Users register with first/last name, a unique email, and a password
/// that is stored as an Argon2id hash. The hash never leaves the server:
/// it is skipped during serialization.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     first_name TEXT NOT NULL,
///     last_name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address, unique, used as the login identity
    pub email: String,

    /// Argon2id password hash, never serialized outward
    #[serde(skip_serializing, default)]
    pub password: String,

    /// When the account was created, assigned once at insertion
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// `password` is the already-computed hash; plaintext never reaches the
/// model layer.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Surfaces the unique-constraint violation when the email is taken.
    pub async fn create(db: impl PgExecutor<'_>, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password, created_at
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.password)
        .fetch_one(db)
        .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Finds a user by email address
    pub async fn find_by_email(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Lists all users in insertion order
    pub async fn find_all(db: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Overwrites all mutable fields of an existing user
    ///
    /// Returns `None` when the id does not exist. `created_at` is left
    /// untouched.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        data: CreateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, password = $5
            WHERE id = $1
            RETURNING id, first_name, last_name, email, password, created_at
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.password)
        .fetch_optional(db)
        .await
    }

    /// Deletes a user, returning whether a row was removed
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether the user is the author of any task
    ///
    /// Drives the delete rule: a user with tasks cannot be removed.
    pub async fn authors_any_task(
        db: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE author_id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }
}
