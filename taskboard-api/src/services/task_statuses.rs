/// Task status business rules
///
/// Plain CRUD with one wrinkle: a status that tasks still point at
/// cannot be deleted.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use taskboard_shared::models::task_status::TaskStatus;

/// Create and update payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusData {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub name: String,
}

/// Creates a new task status
pub async fn create(db: &PgPool, data: TaskStatusData) -> ApiResult<TaskStatus> {
    Ok(TaskStatus::create(db, &data.name).await?)
}

/// Fetches a status by id
pub async fn get(db: &PgPool, id: i64) -> ApiResult<TaskStatus> {
    TaskStatus::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task status not found".to_string()))
}

/// Lists all statuses
pub async fn get_all(db: &PgPool) -> ApiResult<Vec<TaskStatus>> {
    Ok(TaskStatus::find_all(db).await?)
}

/// Renames a status
pub async fn update(db: &PgPool, id: i64, data: TaskStatusData) -> ApiResult<TaskStatus> {
    TaskStatus::update(db, id, &data.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task status not found".to_string()))
}

/// Deletes a status unless tasks still reference it
pub async fn delete(db: &PgPool, id: i64) -> ApiResult<()> {
    let mut tx = db.begin().await?;

    if TaskStatus::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(ApiError::NotFound("Task status not found".to_string()));
    }

    if TaskStatus::is_referenced(&mut *tx, id).await? {
        return Err(ApiError::UnprocessableEntity(
            "Cannot delete the task status. The task status has tasks".to_string(),
        ));
    }

    TaskStatus::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(())
}
