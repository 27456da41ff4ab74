//! Database models - SQLx-compatible structs for PostgreSQL tables

mod character;
mod member;
mod room;
mod user;

pub use character::CharacterSheetModel;
pub use member::RoomMemberModel;
pub use room::RoomModel;
pub use user::UserModel;
