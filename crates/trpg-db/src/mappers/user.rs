//! User model -> entity mapper

use trpg_core::entities::User;
use trpg_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            nickname: model.nickname,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
