//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use serde_json::Value;
use trpg_core::entities::{AbilityScores, CharacterSheet};
use trpg_core::Snowflake;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Nickname must be 1-50 characters"))]
    pub nickname: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update; empty strings are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50, message = "Nickname must be at most 50 characters"))]
    pub nickname: Option<String>,

    /// Avatar URL
    #[validate(length(max = 500, message = "Avatar must be at most 500 characters"))]
    pub avatar: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// Room Requests
// ============================================================================

/// Create room request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Rule system must be at most 50 characters"))]
    pub rule_system: Option<String>,

    /// Optional room password, stored hashed
    #[validate(length(max = 72, message = "Room password must be at most 72 characters"))]
    pub password: Option<String>,

    #[validate(range(min = 1, max = 100, message = "max_players must be between 1 and 100"))]
    pub max_players: Option<i32>,

    pub is_public: Option<bool>,
}

/// Hand the DM role to another member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferDmRequest {
    pub user_id: Snowflake,
}

// ============================================================================
// Character Requests
// ============================================================================

/// Character sheet attributes, used for both create and full replace.
///
/// Omitted fields take their defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CharacterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 50))]
    pub race: Option<String>,
    #[validate(length(max = 50))]
    pub class: Option<String>,
    #[validate(range(min = 1, max = 20, message = "Level must be between 1 and 20"))]
    pub level: Option<i32>,
    #[validate(length(max = 100))]
    pub background: Option<String>,
    #[validate(length(max = 50))]
    pub alignment: Option<String>,

    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub strength: Option<i32>,
    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub dexterity: Option<i32>,
    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub constitution: Option<i32>,
    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub intelligence: Option<i32>,
    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub wisdom: Option<i32>,
    #[validate(range(min = 1, max = 30, message = "Ability scores must be between 1 and 30"))]
    pub charisma: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub armor_class: Option<i32>,
    #[validate(range(min = 0, max = 10000))]
    pub hit_points: Option<i32>,
    #[validate(range(min = 0, max = 10000))]
    pub max_hit_points: Option<i32>,
    #[validate(range(min = 0, max = 1000))]
    pub speed: Option<i32>,
    #[validate(range(min = 0, max = 20))]
    pub proficiency_bonus: Option<i32>,

    pub skills: Option<Value>,
    pub saving_throws: Option<Value>,
    pub equipment: Option<Value>,
    pub spells: Option<Value>,
}

impl CharacterRequest {
    /// Build a sheet from the request, filling omitted fields with defaults
    pub fn into_sheet(self, id: Snowflake, room_id: Snowflake, user_id: Snowflake) -> CharacterSheet {
        let mut sheet = CharacterSheet::new(id, room_id, user_id, self.name);
        let defaults = AbilityScores::default();

        sheet.race = self.race.unwrap_or_default();
        sheet.class = self.class.unwrap_or_default();
        sheet.level = self.level.unwrap_or(CharacterSheet::DEFAULT_LEVEL);
        sheet.background = self.background.unwrap_or_default();
        sheet.alignment = self.alignment.unwrap_or_default();
        sheet.abilities = AbilityScores {
            strength: self.strength.unwrap_or(defaults.strength),
            dexterity: self.dexterity.unwrap_or(defaults.dexterity),
            constitution: self.constitution.unwrap_or(defaults.constitution),
            intelligence: self.intelligence.unwrap_or(defaults.intelligence),
            wisdom: self.wisdom.unwrap_or(defaults.wisdom),
            charisma: self.charisma.unwrap_or(defaults.charisma),
        };
        sheet.armor_class = self.armor_class.unwrap_or(CharacterSheet::DEFAULT_ARMOR_CLASS);
        sheet.hit_points = self.hit_points.unwrap_or(CharacterSheet::DEFAULT_HIT_POINTS);
        sheet.max_hit_points = self
            .max_hit_points
            .unwrap_or(CharacterSheet::DEFAULT_HIT_POINTS);
        sheet.speed = self.speed.unwrap_or(CharacterSheet::DEFAULT_SPEED);
        sheet.proficiency_bonus = self
            .proficiency_bonus
            .unwrap_or(CharacterSheet::DEFAULT_PROFICIENCY_BONUS);
        sheet.skills = self.skills.unwrap_or(Value::Null);
        sheet.saving_throws = self.saving_throws.unwrap_or(Value::Null);
        sheet.equipment = self.equipment.unwrap_or(Value::Null);
        sheet.spells = self.spells.unwrap_or(Value::Null);
        sheet
    }
}
