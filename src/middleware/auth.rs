use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::config;
use crate::database::models::user::UserInfo;
use crate::error::ApiError;
use crate::AppState;

/// Bearer-token verification middleware. Extracts the token, verifies
/// signature and expiry, confirms the subject still exists, and attaches the
/// user projection to the request.
///
/// Exactly one database read per request. A lookup *error* is a server
/// fault (500), not an invalid token; only a missing subject row maps to 401.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        tracing::error!("JWT secret is not configured");
        return Err(ApiError::ServerError);
    }

    let claims = auth::decode_token(&token, secret)
        .map_err(|_| ApiError::unauthorized("Token is not valid"))?;

    let user = sqlx::query_as::<_, UserInfo>("SELECT id, username, email FROM users WHERE id = $1")
        .bind(claims.user_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!("Auth lookup failed for user {}: {}", claims.user_id, e);
            ApiError::ServerError
        })?
        .ok_or_else(|| ApiError::unauthorized("Token is not valid"))?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.trim().is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
