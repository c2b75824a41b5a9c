/// Task status model and database operations
///
/// Statuses are the workflow states tasks point at ("New", "In progress",
/// and so on). Names are unique. A status referenced by any task cannot
/// be deleted; [`TaskStatus::is_referenced`] backs that check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Workflow status a task can be in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    /// Unique status ID
    pub id: i64,

    /// Status name, unique
    pub name: String,

    /// When the status was created
    pub created_at: DateTime<Utc>,
}

impl TaskStatus {
    /// Creates a new task status
    pub async fn create(db: impl PgExecutor<'_>, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, TaskStatus>(
            r#"
            INSERT INTO task_statuses (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(db)
        .await
    }

    /// Finds a status by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, TaskStatus>(
            "SELECT id, name, created_at FROM task_statuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Lists all statuses in insertion order
    pub async fn find_all(db: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, TaskStatus>(
            "SELECT id, name, created_at FROM task_statuses ORDER BY id",
        )
        .fetch_all(db)
        .await
    }

    /// Renames an existing status, `None` when the id does not exist
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, TaskStatus>(
            r#"
            UPDATE task_statuses
            SET name = $2
            WHERE id = $1
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(db)
        .await
    }

    /// Deletes a status, returning whether a row was removed
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether any task references this status
    pub async fn is_referenced(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE task_status_id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }
}
