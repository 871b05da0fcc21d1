use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth;
use crate::database::models::user::UserInfo;
use crate::error::{ApiError, FieldError};
use crate::AppState;

/// POST /api/auth/register - create an account and return a bearer token
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let Some(body) = body.as_object() else {
        return Err(ApiError::bad_request("Expected a JSON object"));
    };

    let mut errors = Vec::new();

    let username = match body.get("username").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => {
            errors.push(FieldError::new("username", "Username is required"));
            None
        }
    };

    let email = match body.get("email").and_then(Value::as_str) {
        Some(s) if looks_like_email(s) => Some(s.trim().to_string()),
        _ => {
            errors.push(FieldError::new("email", "Please include a valid email"));
            None
        }
    };

    let password = match body.get("password").and_then(Value::as_str) {
        Some(s) if s.len() >= 6 => Some(s.to_string()),
        _ => {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
            None
        }
    };

    let (Some(username), Some(email), Some(password)) = (username, email, password) else {
        return Err(ApiError::Validation(errors));
    };

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(&username)
            .bind(&email)
            .fetch_optional(&state.pool)
            .await?;

    if existing.is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = auth::hash_password(&password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::ServerError
    })?;

    let user = sqlx::query_as::<_, UserInfo>(
        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3)
         RETURNING id, username, email",
    )
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.pool)
    .await?;

    let token = auth::generate_token(user.id).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::ServerError
    })?;

    Ok(Json(json!({ "token": token, "user": user })))
}

// Deliberately loose: the mail server has the final say
fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
