/// Bearer-token extraction and the authenticated-user context
///
/// Protected endpoints carry `Authorization: Bearer <token>`. The API
/// server validates the token and makes an [`AuthUser`] available to the
/// handler; this module holds the pieces that do not depend on the server
/// state: header parsing and the context type itself.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

/// Authenticated-user context derived from a validated bearer token
///
/// The email is the token's subject claim. It identifies the caller for
/// ownership checks and for setting a task's author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Email of the authenticated user
    pub email: String,
}

impl AuthUser {
    /// Creates the context from a validated token subject
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Error type for credential extraction
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header present
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a Bearer token
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),
}

/// Extracts the bearer token from the Authorization header
///
/// # Errors
///
/// Returns `AuthError::MissingCredentials` when the header is absent and
/// `AuthError::InvalidFormat` when it does not carry a Bearer token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("header is not valid UTF-8".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("expected a Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_not_a_bearer_token() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_bearer_token() {
        let headers = headers_with("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }
}
