use axum::{Extension, Json};

use crate::database::models::user::UserInfo;

/// GET /api/auth/me - the user attached by the auth middleware
pub async fn me(Extension(user): Extension<UserInfo>) -> Json<UserInfo> {
    Json(user)
}
