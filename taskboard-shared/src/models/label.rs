/// Label model and database operations
///
/// Labels tag tasks through the `task_labels` join table. Like statuses,
/// a label still attached to any task cannot be deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Free-form tag attachable to tasks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique label ID
    pub id: i64,

    /// Label name, unique
    pub name: String,

    /// When the label was created
    pub created_at: DateTime<Utc>,
}

impl Label {
    /// Creates a new label
    pub async fn create(db: impl PgExecutor<'_>, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(db)
        .await
    }

    /// Finds a label by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Label>("SELECT id, name, created_at FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Lists all labels in insertion order
    pub async fn find_all(db: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Label>("SELECT id, name, created_at FROM labels ORDER BY id")
            .fetch_all(db)
            .await
    }

    /// Lists the labels attached to a task, in label-id order
    pub async fn for_task(db: impl PgExecutor<'_>, task_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            SELECT l.id, l.name, l.created_at
            FROM labels l
            JOIN task_labels tl ON tl.label_id = l.id
            WHERE tl.task_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await
    }

    /// Renames an existing label, `None` when the id does not exist
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            UPDATE labels
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

    /// Deletes a label, returning whether a row was removed
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether any task still carries this label
    pub async fn is_referenced(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM task_labels WHERE label_id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }
}
