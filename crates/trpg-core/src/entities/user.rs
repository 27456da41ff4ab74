//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A registered account. The password hash lives only in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, nickname: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            nickname,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial profile update.
    ///
    /// Empty strings are treated the same as absent values. Returns whether
    /// anything changed.
    pub fn apply_profile(&mut self, nickname: Option<&str>, avatar: Option<&str>) -> bool {
        let mut changed = false;

        if let Some(nickname) = nickname.filter(|n| !n.is_empty()) {
            self.nickname = nickname.to_string();
            changed = true;
        }
        if let Some(avatar) = avatar.filter(|a| !a.is_empty()) {
            self.avatar = Some(avatar.to_string());
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}
