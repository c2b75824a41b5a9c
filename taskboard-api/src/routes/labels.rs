/// Label endpoints
///
/// Mirrors the statuses resource: reads are open, mutations require an
/// authenticated caller, deletion is refused while tasks carry the
/// label.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
    services::labels::{self, LabelData},
};
use taskboard_shared::auth::middleware::AuthUser;
use taskboard_shared::models::label::Label;

/// Creates a new label, 201 on success
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(data): ValidatedJson<LabelData>,
) -> ApiResult<(StatusCode, Json<Label>)> {
    let label = labels::create(&state.db, data).await?;

    Ok((StatusCode::CREATED, Json(label)))
}

/// Lists all labels
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Label>>> {
    Ok(Json(labels::get_all(&state.db).await?))
}

/// Fetches a label by id, 404 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Label>> {
    Ok(Json(labels::get(&state.db, id).await?))
}

/// Renames a label
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(data): ValidatedJson<LabelData>,
) -> ApiResult<Json<Label>> {
    Ok(Json(labels::update(&state.db, id, data).await?))
}

/// Deletes a label, 422 while tasks carry it
pub async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    labels::delete(&state.db, id).await?;

    Ok(StatusCode::OK)
}
