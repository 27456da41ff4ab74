//! Character sheet database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// Database model for character_sheets table
#[derive(Debug, Clone, FromRow)]
pub struct CharacterSheetModel {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
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
    pub skills: Option<Value>,
    pub saving_throws: Option<Value>,
    pub equipment: Option<Value>,
    pub spells: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
