/// Task status endpoints
///
/// # Endpoints
///
/// - `POST {base}/statuses` - create (authenticated)
/// - `GET {base}/statuses` - list all (open)
/// - `GET {base}/statuses/:id` - fetch one (open)
/// - `PUT {base}/statuses/:id` - rename (authenticated)
/// - `DELETE {base}/statuses/:id` - delete (authenticated), refused
///   while tasks reference the status

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
    services::task_statuses::{self, TaskStatusData},
};
use taskboard_shared::auth::middleware::AuthUser;
use taskboard_shared::models::task_status::TaskStatus;

/// Creates a new task status, 201 on success
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(data): ValidatedJson<TaskStatusData>,
) -> ApiResult<(StatusCode, Json<TaskStatus>)> {
    let status = task_statuses::create(&state.db, data).await?;

    Ok((StatusCode::CREATED, Json(status)))
}

/// Lists all task statuses
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskStatus>>> {
    Ok(Json(task_statuses::get_all(&state.db).await?))
}

/// Fetches a task status by id, 404 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskStatus>> {
    Ok(Json(task_statuses::get(&state.db, id).await?))
}

/// Renames a task status
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(data): ValidatedJson<TaskStatusData>,
) -> ApiResult<Json<TaskStatus>> {
    Ok(Json(task_statuses::update(&state.db, id, data).await?))
}

/// Deletes a task status, 422 while tasks reference it
pub async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    task_statuses::delete(&state.db, id).await?;

    Ok(StatusCode::OK)
}
