/// Login and token issuance
///
/// # Endpoint
///
/// ```text
/// POST {base}/login
/// Content-Type: application/json
///
/// {
///   "username": "user@example.com",
///   "password": "secret"
/// }
/// ```
///
/// On success the body is the signed token itself; clients present it
/// back as `Authorization: Bearer <token>`. Every failure, including a
/// malformed body, is a 401 with an empty body: the endpoint's contract
/// is "valid credentials or nothing".

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use taskboard_shared::auth::{jwt, password};
use taskboard_shared::models::user::User;

/// Login request
///
/// The username carries the user's email.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    /// Email address used at registration
    pub username: String,

    /// Plaintext password, compared against the stored hash
    pub password: String,
}

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginData>, JsonRejection>,
) -> ApiResult<String> {
    let Json(data) = payload.map_err(|_| ApiError::Unauthorized)?;

    let user = User::find_by_email(&state.db, &data.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !password::verify_password(&data.password, &user.password)? {
        return Err(ApiError::Unauthorized);
    }

    let claims = jwt::Claims::new(user.email, state.config.jwt.ttl());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(token)
}
