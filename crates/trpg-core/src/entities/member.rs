//! Room membership - a user's seat at a room

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Role a member holds inside a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Dm,
    Player,
}

impl MemberRole {
    /// Storage and wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dm => "dm",
            Self::Player => "player",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm" => Ok(Self::Dm),
            "player" => Ok(Self::Player),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

/// Junction between User and Room. At most one per (room, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl RoomMember {
    /// Create a membership with the given role
    pub fn new(room_id: Snowflake, user_id: Snowflake, role: MemberRole) -> Self {
        Self {
            room_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    /// Membership for a user joining an existing room
    pub fn player(room_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(room_id, user_id, MemberRole::Player)
    }

    /// Membership materialized for the room creator
    pub fn dm(room_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(room_id, user_id, MemberRole::Dm)
    }

    #[inline]
    pub fn is_dm(&self) -> bool {
        self.role == MemberRole::Dm
    }
}
