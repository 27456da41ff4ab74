//! Character sheet entity - a player's character inside one room

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::Snowflake;

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub const DEFAULT_SCORE: i32 = 10;
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: Self::DEFAULT_SCORE,
            dexterity: Self::DEFAULT_SCORE,
            constitution: Self::DEFAULT_SCORE,
            intelligence: Self::DEFAULT_SCORE,
            wisdom: Self::DEFAULT_SCORE,
            charisma: Self::DEFAULT_SCORE,
        }
    }
}

/// Character sheet owned by a user within a room
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSheet {
    pub id: Snowflake,
    pub room_id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub race: String,
    pub class: String,
    pub level: i32,
    pub background: String,
    pub alignment: String,
    pub abilities: AbilityScores,
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

impl CharacterSheet {
    pub const DEFAULT_LEVEL: i32 = 1;
    pub const DEFAULT_ARMOR_CLASS: i32 = 10;
    pub const DEFAULT_HIT_POINTS: i32 = 10;
    pub const DEFAULT_SPEED: i32 = 30;
    pub const DEFAULT_PROFICIENCY_BONUS: i32 = 2;

    /// Create a blank sheet with every optional field at its default
    pub fn new(id: Snowflake, room_id: Snowflake, user_id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            room_id,
            user_id,
            name,
            race: String::new(),
            class: String::new(),
            level: Self::DEFAULT_LEVEL,
            background: String::new(),
            alignment: String::new(),
            abilities: AbilityScores::default(),
            armor_class: Self::DEFAULT_ARMOR_CLASS,
            hit_points: Self::DEFAULT_HIT_POINTS,
            max_hit_points: Self::DEFAULT_HIT_POINTS,
            speed: Self::DEFAULT_SPEED,
            proficiency_bonus: Self::DEFAULT_PROFICIENCY_BONUS,
            skills: Value::Null,
            saving_throws: Value::Null,
            equipment: Value::Null,
            spells: Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    #[inline]
    pub fn belongs_to(&self, room_id: Snowflake) -> bool {
        self.room_id == room_id
    }

    /// Replace every mutable field with the values of `other`.
    ///
    /// Identity, ownership and creation time are kept.
    pub fn replace_with(&mut self, other: CharacterSheet) {
        let CharacterSheet {
            name,
            race,
            class,
            level,
            background,
            alignment,
            abilities,
            armor_class,
            hit_points,
            max_hit_points,
            speed,
            proficiency_bonus,
            skills,
            saving_throws,
            equipment,
            spells,
            ..
        } = other;

        self.name = name;
        self.race = race;
        self.class = class;
        self.level = level;
        self.background = background;
        self.alignment = alignment;
        self.abilities = abilities;
        self.armor_class = armor_class;
        self.hit_points = hit_points;
        self.max_hit_points = max_hit_points;
        self.speed = speed;
        self.proficiency_bonus = proficiency_bonus;
        self.skills = skills;
        self.saving_throws = saving_throws;
        self.equipment = equipment;
        self.spells = spells;
        self.updated_at = Utc::now();
    }
}
