//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use trpg_core::entities::MemberRole;

// ============================================================================
// Auth Responses
// ============================================================================

/// Registration result
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub email: String,
    pub nickname: String,
}

/// Login result with access token
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub email: String,
    pub nickname: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// The authenticated user's own profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub nickname: String,
    pub avatar: Option<String>,
}

// ============================================================================
// Room Responses
// ============================================================================

/// Room as seen by clients. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub rule_system: String,
    pub is_public: bool,
    pub has_password: bool,
    pub max_players: i32,
    /// Only shown to members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub dm_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's membership in a room
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub room_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Member list entry
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Character Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub name: String,
    pub race: String,
    pub class: String,
    pub level: i32,
    pub background: String,
    pub alignment: String,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub armor_class: i32,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub speed: i32,
    pub proficiency_bonus: i32,
    pub skills: Value,
    pub saving_throws: Value,
    pub equipment: Value,
    pub spells: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
