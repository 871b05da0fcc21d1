use axum::{extract::State, Extension, Json};

use crate::database::models::project::Project;
use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

/// GET /api/projects - all projects owned by the caller, newest first.
/// No pagination; filtering is a client-side concern.
pub async fn project_list(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(projects))
}
