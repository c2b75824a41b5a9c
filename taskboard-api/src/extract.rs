/// Request extractors
///
/// Two extractors carry the boundary rules of the API:
///
/// - [`ValidatedJson`] deserializes the body and runs its declarative
///   constraints, so handlers and services only ever see a DTO whose
///   required fields are present and well-formed.
/// - [`AuthUser`] (implemented here for the shared context type) turns a
///   valid bearer token into the authenticated caller, rejecting with
///   401 otherwise.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, FieldViolation},
};
use taskboard_shared::auth::{jwt, middleware, middleware::AuthUser};

/// JSON body that passed both deserialization and validation
///
/// Rejections are 422 responses listing the violated fields. Handlers
/// take this as their last argument, in place of `Json<T>`.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(vec![FieldViolation {
                field: "body".to_string(),
                message: rejection.body_text(),
            }])
        })?;

        value.validate().map_err(validation_violations)?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens validator's error tree into the response's violation list
pub fn validation_violations(errors: validator::ValidationErrors) -> ApiError {
    let violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldViolation {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    ApiError::Validation(violations)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = middleware::bearer_token(&parts.headers)?;
        let claims = jwt::validate_token(token, state.jwt_secret())?;

        Ok(AuthUser::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be blank"))]
        name: String,
    }

    #[test]
    fn test_violations_carry_field_and_message() {
        let sample = Sample {
            name: String::new(),
        };
        let err = validation_violations(sample.validate().unwrap_err());

        let ApiError::Validation(violations) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[0].message, "must not be blank");
    }
}
