//! Room entity - a game session hosted by a DM

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A game session container owned by its DM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub rule_system: String,
    pub is_public: bool,
    /// Argon2 hash of the join password, if the room has one
    pub password_hash: Option<String>,
    pub max_players: i32,
    pub invite_code: String,
    pub dm_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub const DEFAULT_RULE_SYSTEM: &'static str = "DND5e";
    pub const DEFAULT_MAX_PLAYERS: i32 = 10;
    pub const MIN_PLAYERS: i32 = 1;
    pub const MAX_PLAYERS: i32 = 100;
    pub const INVITE_CODE_LEN: usize = 8;

    /// Create a new private room with default settings
    pub fn new(id: Snowflake, dm_id: Snowflake, name: String, invite_code: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            rule_system: Self::DEFAULT_RULE_SYSTEM.to_string(),
            is_public: false,
            password_hash: None,
            max_players: Self::DEFAULT_MAX_PLAYERS,
            invite_code,
            dm_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user is the room's DM
    #[inline]
    pub fn is_dm(&self, user_id: Snowflake) -> bool {
        self.dm_id == user_id
    }

    #[inline]
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Whether a room holding `member_count` members can seat one more
    #[inline]
    pub fn has_capacity_for(&self, member_count: i64) -> bool {
        member_count < i64::from(self.max_players)
    }

    /// Hand the room to a new DM
    pub fn transfer_to(&mut self, new_dm_id: Snowflake) {
        self.dm_id = new_dm_id;
        self.updated_at = Utc::now();
    }
}

/// Generate a random invite code (8 characters from `A-Z0-9`)
pub fn generate_invite_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let mut rng = rand::thread_rng();
    (0..Room::INVITE_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
