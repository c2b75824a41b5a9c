/// User business rules
///
/// Registration and update hash the incoming password before it touches
/// the model layer; deletion is refused while the user still authors
/// tasks. Ownership of update/delete is checked by the handler, after
/// the target has been found.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use taskboard_shared::auth::password;
use taskboard_shared::models::user::{CreateUser, User};

/// Registration and update payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[validate(
        length(min = 1, message = "must not be blank"),
        email(message = "must be a well-formed email address")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "must not be blank"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "must not be blank"))]
    pub last_name: String,

    #[validate(length(min = 3, max = 100, message = "size must be between 3 and 100"))]
    pub password: String,
}

impl UserData {
    /// Hashes the password and shapes the data for the model layer
    fn into_record(self) -> ApiResult<CreateUser> {
        let password = password::hash_password(&self.password)?;

        Ok(CreateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password,
        })
    }
}

/// Registers a new user
pub async fn create(db: &PgPool, data: UserData) -> ApiResult<User> {
    let user = User::create(db, data.into_record()?).await?;
    Ok(user)
}

/// Fetches a user by id
pub async fn get(db: &PgPool, id: i64) -> ApiResult<User> {
    User::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Lists all users
pub async fn get_all(db: &PgPool) -> ApiResult<Vec<User>> {
    Ok(User::find_all(db).await?)
}

/// Overwrites all mutable fields of a user, re-hashing the password
pub async fn update(db: &PgPool, id: i64, data: UserData) -> ApiResult<User> {
    User::update(db, id, data.into_record()?)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Deletes a user unless tasks still name them as author
pub async fn delete(db: &PgPool, id: i64) -> ApiResult<()> {
    let mut tx = db.begin().await?;

    if User::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    if User::authors_any_task(&mut *tx, id).await? {
        return Err(ApiError::UnprocessableEntity(
            "Cannot delete the user. The user has tasks".to_string(),
        ));
    }

    User::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(())
}
