use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

/// DELETE /api/projects/:id - owner-scoped delete.
/// A second delete of the same id is a 404, not a success.
pub async fn project_delete(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if super::fetch_owned(&state.pool, id, user.id).await?.is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "Project deleted successfully" })))
}
