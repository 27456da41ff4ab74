//! Domain entities - core business objects

mod character;
mod member;
mod room;
mod user;

pub use character::{AbilityScores, CharacterSheet};
pub use member::{MemberRole, RoomMember};
pub use room::{generate_invite_code, Room};
pub use user::User;
