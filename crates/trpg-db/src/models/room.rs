//! Room database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for rooms table
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub rule_system: String,
    pub is_public: bool,
    pub password_hash: Option<String>,
    pub max_players: i32,
    pub invite_code: String,
    pub dm_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
