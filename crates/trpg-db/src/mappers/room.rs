//! Room model -> entity mapper

use trpg_core::entities::Room;
use trpg_core::value_objects::Snowflake;

use crate::models::RoomModel;

impl From<RoomModel> for Room {
    fn from(model: RoomModel) -> Self {
        Room {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            rule_system: model.rule_system,
            is_public: model.is_public,
            password_hash: model.password_hash,
            max_players: model.max_players,
            invite_code: model.invite_code,
            dm_id: Snowflake::new(model.dm_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
