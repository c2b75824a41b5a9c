/// Task model and database operations
///
/// A task is the aggregate of the system: it references a status and an
/// author (required), an executor (optional), and a set of labels through
/// the `task_labels` join table. Reads return the aggregate with every
/// reference eagerly attached, so the HTTP layer serializes complete
/// objects rather than bare foreign keys.
///
/// Creation and update run several statements (the task row plus its
/// label links), so those functions take a connection the caller has
/// already placed inside a transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};

use super::{label::Label, task_status::TaskStatus, user::User};

/// Task aggregate with related entities attached
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task name, unique
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Workflow status, required
    pub task_status: TaskStatus,

    /// User who created the task, never changed afterwards
    pub author: User,

    /// User assigned to perform the task, optional
    pub executor: Option<User>,

    /// Labels attached to the task
    pub labels: Vec<Label>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Bare task row as stored in the `tasks` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    description: Option<String>,
    task_status_id: i64,
    author_id: i64,
    executor_id: Option<i64>,
    created_at: DateTime<Utc>,
}

/// Input for inserting a task
///
/// All ids are assumed to reference existing rows; the service layer
/// confirms that before calling in.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub author_id: i64,
    pub executor_id: Option<i64>,
    pub label_ids: Vec<i64>,
}

/// Replacement values for an existing task
///
/// The author is deliberately absent: it is fixed at creation. An empty
/// `label_ids` clears the label set.
#[derive(Debug, Clone)]
pub struct TaskChanges {
    pub name: String,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub executor_id: Option<i64>,
    pub label_ids: Vec<i64>,
}

/// Query-string filter for listing tasks
///
/// Every present field narrows the result; fields combine with AND.
/// `labels` matches tasks carrying the given label id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub task_status: Option<i64>,
    pub executor: Option<i64>,
    pub author: Option<i64>,
    pub labels: Option<i64>,
}

impl Task {
    /// Inserts a task and attaches its labels
    ///
    /// # Errors
    ///
    /// Surfaces the unique-constraint violation when the name is taken.
    pub async fn create(conn: &mut PgConnection, data: NewTask) -> Result<Self, sqlx::Error> {
        let row: TaskRow = sqlx::query_as(
            r#"
            INSERT INTO tasks (name, description, task_status_id, author_id, executor_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, task_status_id, author_id, executor_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.task_status_id)
        .bind(data.author_id)
        .bind(data.executor_id)
        .fetch_one(&mut *conn)
        .await?;

        attach_labels(conn, row.id, &data.label_ids).await?;

        Self::load(conn, row).await
    }

    /// Finds a task by ID with all references attached
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, task_status_id, author_id, executor_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::load(conn, row).await?)),
            None => Ok(None),
        }
    }

    /// Lists tasks matching the filter, in insertion order
    ///
    /// Absent filter fields exclude their criterion, so the default
    /// filter returns every task.
    pub async fn find_all(
        conn: &mut PgConnection,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, task_status_id, author_id, executor_id, created_at
            FROM tasks
            WHERE ($1::BIGINT IS NULL OR task_status_id = $1)
              AND ($2::BIGINT IS NULL OR executor_id = $2)
              AND ($3::BIGINT IS NULL OR author_id = $3)
              AND ($4::BIGINT IS NULL
                   OR id IN (SELECT task_id FROM task_labels WHERE label_id = $4))
            ORDER BY id
            "#,
        )
        .bind(filter.task_status)
        .bind(filter.executor)
        .bind(filter.author)
        .bind(filter.labels)
        .fetch_all(&mut *conn)
        .await?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(Self::load(conn, row).await?);
        }

        Ok(tasks)
    }

    /// Replaces a task's fields and label set
    ///
    /// Returns `None` when the id does not exist. The label set is fully
    /// replaced: previous links are dropped before the new ones are
    /// inserted.
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            UPDATE tasks
            SET name = $2, description = $3, task_status_id = $4, executor_id = $5
            WHERE id = $1
            RETURNING id, name, description, task_status_id, author_id, executor_id, created_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.task_status_id)
        .bind(changes.executor_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM task_labels WHERE task_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        attach_labels(conn, id, &changes.label_ids).await?;

        Ok(Some(Self::load(conn, row).await?))
    }

    /// Deletes a task, returning whether a row was removed
    ///
    /// Label links go away with the row (ON DELETE CASCADE).
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Resolves a bare row into the aggregate
    ///
    /// Status and author are NOT NULL foreign keys, so a missing related
    /// row is a broken invariant and surfaces as `RowNotFound`.
    async fn load(conn: &mut PgConnection, row: TaskRow) -> Result<Self, sqlx::Error> {
        let task_status = TaskStatus::find_by_id(&mut *conn, row.task_status_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let author = User::find_by_id(&mut *conn, row.author_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let executor = match row.executor_id {
            Some(executor_id) => User::find_by_id(&mut *conn, executor_id).await?,
            None => None,
        };

        let labels = Label::for_task(&mut *conn, row.id).await?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            task_status,
            author,
            executor,
            labels,
            created_at: row.created_at,
        })
    }
}

/// Inserts join rows for the given label ids
///
/// Duplicate ids collapse into one link.
async fn attach_labels(
    conn: &mut PgConnection,
    task_id: i64,
    label_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for label_id in label_ids {
        sqlx::query(
            r#"
            INSERT INTO task_labels (task_id, label_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(label_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
