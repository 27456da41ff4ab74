//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table (password hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
