//! Character sheet model -> entity mapper

use serde_json::Value;
use trpg_core::entities::{AbilityScores, CharacterSheet};
use trpg_core::value_objects::Snowflake;

use crate::models::CharacterSheetModel;

impl From<CharacterSheetModel> for CharacterSheet {
    fn from(model: CharacterSheetModel) -> Self {
        CharacterSheet {
            id: Snowflake::new(model.id),
            room_id: Snowflake::new(model.room_id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            race: model.race,
            class: model.class,
            level: model.level,
            background: model.background,
            alignment: model.alignment,
            abilities: AbilityScores {
                strength: model.strength,
                dexterity: model.dexterity,
                constitution: model.constitution,
                intelligence: model.intelligence,
                wisdom: model.wisdom,
                charisma: model.charisma,
            },
            armor_class: model.armor_class,
            hit_points: model.hit_points,
            max_hit_points: model.max_hit_points,
            speed: model.speed,
            proficiency_bonus: model.proficiency_bonus,
            skills: model.skills.unwrap_or(Value::Null),
            saving_throws: model.saving_throws.unwrap_or(Value::Null),
            equipment: model.equipment.unwrap_or(Value::Null),
            spells: model.spells.unwrap_or(Value::Null),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// JSON `null` is stored as SQL `NULL`
pub fn json_or_null(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}
