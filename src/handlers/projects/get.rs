use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::database::models::project::Project;
use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

/// GET /api/projects/:id - single project, owner-scoped
pub async fn project_get(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    let project = super::fetch_owned(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(Json(project))
}
