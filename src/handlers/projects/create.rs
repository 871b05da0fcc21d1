use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::database::models::project::Project;
use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

use super::validation;

/// POST /api/projects - create a project owned by the caller
pub async fn project_create(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Json(body): Json<Value>,
) -> Result<Json<Project>, ApiError> {
    let Some(body) = body.as_object() else {
        return Err(ApiError::bad_request("Expected a JSON object"));
    };

    let new = validation::validate_create(body).map_err(ApiError::Validation)?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO projects (user_id, title, description, status, priority, start_date, end_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(user.id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.status.as_str())
    .bind(new.priority.as_str())
    .bind(new.start_date)
    .bind(new.end_date)
    .fetch_one(&state.pool)
    .await?;

    // Re-read by primary key so server-assigned defaults and timestamps come back
    let project = super::fetch_owned(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(Json(project))
}
