/// Task endpoints
///
/// # Endpoints
///
/// - `POST {base}/tasks` - create (authenticated; the caller becomes
///   the author)
/// - `GET {base}/tasks` - list, optionally filtered (open)
/// - `GET {base}/tasks/:id` - fetch one (open)
/// - `PUT {base}/tasks/:id` - update (any authenticated user)
/// - `DELETE {base}/tasks/:id` - delete, author only
///
/// The list filter accepts `taskStatus`, `executor`, `author`, and
/// `labels` query parameters, each an id, combined with AND.
///
/// Update deliberately skips the ownership guard while delete enforces
/// it: any collaborator may edit a task, but only its author may remove
/// it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
    services::tasks::{self, TaskData},
};
use taskboard_shared::auth::{authorization::require_owner, middleware::AuthUser};
use taskboard_shared::models::task::{Task, TaskFilter};

/// Creates a task authored by the caller, 201 on success
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(data): ValidatedJson<TaskData>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = tasks::create(&state.db, &auth.email, data).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Lists tasks matching the query filter
pub async fn get_all(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(tasks::list(&state.db, &filter).await?))
}

/// Fetches a task by id, 404 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    Ok(Json(tasks::get(&state.db, id).await?))
}

/// Updates a task; any authenticated user may do this
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(data): ValidatedJson<TaskData>,
) -> ApiResult<Json<Task>> {
    Ok(Json(tasks::update(&state.db, id, data).await?))
}

/// Deletes a task; only its author may do this
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let task = tasks::get(&state.db, id).await?;
    require_owner(&auth, &task.author.email)?;

    tasks::delete(&state.db, id).await?;

    Ok(StatusCode::OK)
}
