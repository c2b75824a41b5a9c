/// Label business rules
///
/// Mirrors the task status service; the delete rule looks at the
/// `task_labels` join table instead of a direct foreign key.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use taskboard_shared::models::label::Label;

/// Create and update payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LabelData {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub name: String,
}

/// Creates a new label
pub async fn create(db: &PgPool, data: LabelData) -> ApiResult<Label> {
    Ok(Label::create(db, &data.name).await?)
}

/// Fetches a label by id
pub async fn get(db: &PgPool, id: i64) -> ApiResult<Label> {
    Label::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Label not found".to_string()))
}

/// Lists all labels
pub async fn get_all(db: &PgPool) -> ApiResult<Vec<Label>> {
    Ok(Label::find_all(db).await?)
}

/// Renames a label
pub async fn update(db: &PgPool, id: i64, data: LabelData) -> ApiResult<Label> {
    Label::update(db, id, &data.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Label not found".to_string()))
}

/// Deletes a label unless tasks still carry it
pub async fn delete(db: &PgPool, id: i64) -> ApiResult<()> {
    let mut tx = db.begin().await?;

    if Label::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(ApiError::NotFound("Label not found".to_string()));
    }

    if Label::is_referenced(&mut *tx, id).await? {
        return Err(ApiError::UnprocessableEntity(
            "Cannot delete the label. Tasks have labels".to_string(),
        ));
    }

    Label::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(())
}
