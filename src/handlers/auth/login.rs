use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::database::models::user::{User, UserInfo};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - exchange credentials for a bearer token.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.pool)
        .await?;

    let Some(user) = user else {
        return Err(ApiError::bad_request("Invalid credentials"));
    };

    if !auth::verify_password(&payload.password, &user.password) {
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let token = auth::generate_token(user.id).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::ServerError
    })?;

    Ok(Json(json!({ "token": token, "user": UserInfo::from(&user) })))
}
