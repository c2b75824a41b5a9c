/// Error handling for the API server
///
/// A single error type that maps to HTTP responses. Handlers and services
/// return `Result<T, ApiError>`, and the error converts itself into the
/// right status code and body at the boundary:
///
/// - validation failures carry a per-field violation list (422)
/// - delete conflicts carry a human-readable message (422)
/// - authentication and ownership failures produce empty bodies (401/403)
/// - internal errors are logged and never leak details to the client

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskboard_shared::auth::{
    authorization::AuthzError, jwt::JwtError, middleware::AuthError, password::PasswordError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): a referenced id inside the body does not exist
    BadRequest(String),

    /// Unauthorized (401): missing/invalid/expired token or failed login
    Unauthorized,

    /// Forbidden (403): authenticated caller is not the resource owner
    Forbidden,

    /// Not found (404): the primary resource id does not exist
    NotFound(String),

    /// Unprocessable entity (422): delete blocked by existing references
    UnprocessableEntity(String),

    /// Unprocessable entity (422): request body failed validation
    Validation(Vec<FieldViolation>),

    /// Internal server error (500)
    Internal(String),
}

/// Single field validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field that failed validation
    pub field: String,

    /// Violation message
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field violations, present for validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Forbidden => write!(f, "Forbidden"),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::UnprocessableEntity(msg) => write!(f, "Unprocessable entity: {}", msg),
            ApiError::Validation(violations) => {
                write!(f, "Validation failed: {} violations", violations.len())
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 401 and 403 respond with an empty body: nothing about the
        // protected resource may leak to an unauthenticated or
        // unauthorized caller.
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            ApiError::Forbidden => return StatusCode::FORBIDDEN.into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable_entity",
                msg,
                None,
            ),
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(violations),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-constraint violations surface as 422, matching the treatment
/// of the other data-integrity failures.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    return ApiError::UnprocessableEntity(format!(
                        "Constraint violation: {}",
                        constraint
                    ));
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Credential extraction failures are all 401 with an empty body
impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

/// Token validation failures are all 401 with an empty body
impl From<JwtError> for ApiError {
    fn from(_: JwtError) -> Self {
        ApiError::Unauthorized
    }
}

/// Ownership failures are 403 with an empty body
impl From<AuthzError> for ApiError {
    fn from(_: AuthzError) -> Self {
        ApiError::Forbidden
    }
}

/// Hashing failures never reflect caller input, so they are internal
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Task status not found".to_string());
        assert_eq!(err.to_string(), "Bad request: Task status not found");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ApiError::UnprocessableEntity("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Validation(vec![]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_have_empty_bodies() {
        for err in [ApiError::Unauthorized, ApiError::Forbidden] {
            let response = err.into_response();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(bytes.is_empty());
        }
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
