//! Room member model -> entity mapper

use trpg_core::entities::{MemberRole, RoomMember};
use trpg_core::error::DomainError;
use trpg_core::value_objects::Snowflake;

use crate::models::RoomMemberModel;

/// Fails only if the `role` column holds a value the check constraint should have rejected
impl TryFrom<RoomMemberModel> for RoomMember {
    type Error = DomainError;

    fn try_from(model: RoomMemberModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<MemberRole>()
            .map_err(DomainError::DatabaseError)?;

        Ok(RoomMember {
            room_id: Snowflake::new(model.room_id),
            user_id: Snowflake::new(model.user_id),
            role,
            joined_at: model.joined_at,
        })
    }
}
