/// User endpoints
///
/// # Endpoints
///
/// - `POST {base}/users` - register (open)
/// - `GET {base}/users` - list all users (open)
/// - `GET {base}/users/:id` - fetch one user (open)
/// - `PUT {base}/users/:id` - update, owner only
/// - `DELETE {base}/users/:id` - delete, owner only, refused while the
///   user authors tasks
///
/// The owner of a user resource is the user whose email matches the
/// authenticated caller's token subject.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
    services::users::{self, UserData},
};
use taskboard_shared::auth::{authorization::require_owner, middleware::AuthUser};
use taskboard_shared::models::user::User;

/// Registers a new user, 201 on success
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<UserData>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = users::create(&state.db, data).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Lists all users
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(users::get_all(&state.db).await?))
}

/// Fetches a user by id, 404 when absent
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(users::get(&state.db, id).await?))
}

/// Updates a user; only the owner may do this
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(data): ValidatedJson<UserData>,
) -> ApiResult<Json<User>> {
    let target = users::get(&state.db, id).await?;
    require_owner(&auth, &target.email)?;

    let user = users::update(&state.db, id, data).await?;

    Ok(Json(user))
}

/// Deletes a user; only the owner may do this
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let target = users::get(&state.db, id).await?;
    require_owner(&auth, &target.email)?;

    users::delete(&state.db, id).await?;

    Ok(StatusCode::OK)
}
