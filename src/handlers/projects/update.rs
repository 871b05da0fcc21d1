use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use sqlx::QueryBuilder;

use crate::database::models::project::Project;
use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

use super::validation;

/// PUT /api/projects/:id - partial update, owner-scoped.
///
/// Only fields present in the body enter the statement; the sparse change
/// set is turned into one parameterized UPDATE, never concatenated values.
pub async fn project_update(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Project>, ApiError> {
    let Some(body) = body.as_object() else {
        return Err(ApiError::bad_request("Expected a JSON object"));
    };

    // Ownership first: absent and not-owned are the same 404
    if super::fetch_owned(&state.pool, id, user.id).await?.is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    let changes = validation::validate_update(body).map_err(ApiError::Validation)?;
    if changes.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let mut builder = QueryBuilder::new("UPDATE projects SET ");
    {
        let mut fields = builder.separated(", ");

        if let Some(title) = changes.title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(status) = changes.status {
            fields.push("status = ").push_bind_unseparated(status.as_str());
        }
        if let Some(priority) = changes.priority {
            fields.push("priority = ").push_bind_unseparated(priority.as_str());
        }
        if let Some(start_date) = changes.start_date {
            fields.push("start_date = ").push_bind_unseparated(start_date);
        }
        if let Some(end_date) = changes.end_date {
            fields.push("end_date = ").push_bind_unseparated(end_date);
        }

        fields.push("updated_at = now()");
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND user_id = ")
        .push_bind(user.id);

    builder.build().execute(&state.pool).await?;

    let project = super::fetch_owned(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(Json(project))
}
