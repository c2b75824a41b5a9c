/// Task business rules
///
/// Creation and update resolve every referenced id before any write:
/// an unknown status, executor, or label id turns the request away with
/// a 400 naming the missing reference. The author is the authenticated
/// caller at creation and is never touched again; update may be
/// performed by any authenticated user, while deletion is reserved for
/// the author (the handler enforces that with the ownership guard).

use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use taskboard_shared::models::{
    label::Label,
    task::{NewTask, Task, TaskChanges, TaskFilter},
    task_status::TaskStatus,
    user::User,
};

/// Create and update payload
///
/// `labelIds` is replace-or-clear: when present, the label set becomes
/// exactly the given ids; when absent, existing labels are cleared.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub name: String,

    pub description: Option<String>,

    pub executor_id: Option<i64>,

    pub task_status_id: i64,

    pub label_ids: Option<Vec<i64>>,
}

/// Creates a task authored by the authenticated caller
pub async fn create(db: &PgPool, author_email: &str, data: TaskData) -> ApiResult<Task> {
    let mut tx = db.begin().await?;

    // the token subject must still exist as a user
    let author = User::find_by_email(&mut *tx, author_email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    resolve_references(&mut *tx, &data).await?;

    let task = Task::create(
        &mut *tx,
        NewTask {
            name: data.name,
            description: data.description,
            task_status_id: data.task_status_id,
            author_id: author.id,
            executor_id: data.executor_id,
            label_ids: data.label_ids.unwrap_or_default(),
        },
    )
    .await?;

    tx.commit().await?;
    Ok(task)
}

/// Fetches a task by id
pub async fn get(db: &PgPool, id: i64) -> ApiResult<Task> {
    let mut conn = db.acquire().await?;

    Task::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))
}

/// Lists tasks matching the filter
pub async fn list(db: &PgPool, filter: &TaskFilter) -> ApiResult<Vec<Task>> {
    let mut conn = db.acquire().await?;

    Ok(Task::find_all(&mut *conn, filter).await?)
}

/// Replaces a task's fields and label set
///
/// A missing task id is a bad request here, not a 404: the id arrives
/// as part of a mutation whose references are all checked the same way.
pub async fn update(db: &PgPool, id: i64, data: TaskData) -> ApiResult<Task> {
    let mut tx = db.begin().await?;

    if Task::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(ApiError::BadRequest("Task not found".to_string()));
    }

    resolve_references(&mut *tx, &data).await?;

    let task = Task::update(
        &mut *tx,
        id,
        TaskChanges {
            name: data.name,
            description: data.description,
            task_status_id: data.task_status_id,
            executor_id: data.executor_id,
            label_ids: data.label_ids.unwrap_or_default(),
        },
    )
    .await?
    .ok_or_else(|| ApiError::BadRequest("Task not found".to_string()))?;

    tx.commit().await?;
    Ok(task)
}

/// Deletes a task
///
/// The handler has already confirmed the caller is the author.
pub async fn delete(db: &PgPool, id: i64) -> ApiResult<()> {
    if !Task::delete(db, id).await? {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(())
}

/// Confirms every id referenced by the payload resolves to a row
async fn resolve_references(conn: &mut PgConnection, data: &TaskData) -> ApiResult<()> {
    if TaskStatus::find_by_id(&mut *conn, data.task_status_id)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest("Task status not found".to_string()));
    }

    if let Some(executor_id) = data.executor_id {
        if User::find_by_id(&mut *conn, executor_id).await?.is_none() {
            return Err(ApiError::BadRequest("Executor not found".to_string()));
        }
    }

    if let Some(label_ids) = &data.label_ids {
        for label_id in label_ids {
            if Label::find_by_id(&mut *conn, *label_id).await?.is_none() {
                return Err(ApiError::BadRequest("Label not found".to_string()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let data = TaskData {
            name: String::new(),
            description: None,
            executor_id: None,
            task_status_id: 1,
            label_ids: None,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_payload_deserializes_camel_case() {
        let data: TaskData = serde_json::from_str(
            r#"{"name": "T", "taskStatusId": 3, "executorId": 2, "labelIds": [1, 2]}"#,
        )
        .unwrap();

        assert_eq!(data.task_status_id, 3);
        assert_eq!(data.executor_id, Some(2));
        assert_eq!(data.label_ids, Some(vec![1, 2]));
        assert_eq!(data.description, None);
    }

    #[test]
    fn test_missing_status_id_fails_deserialization() {
        let result: Result<TaskData, _> = serde_json::from_str(r#"{"name": "T"}"#);
        assert!(result.is_err());
    }
}
