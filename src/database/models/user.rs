use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full `users` row. Only ever used server-side; the password hash must not
/// cross the API boundary.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing projection of a user, also attached to verified requests.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
