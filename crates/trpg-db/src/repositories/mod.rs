//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in trpg-core.
//! Each repository handles database operations for a specific domain entity.

mod character;
mod error;
mod member;
mod room;
mod user;

pub use character::PgCharacterRepository;
pub use member::PgMemberRepository;
pub use room::PgRoomRepository;
pub use user::PgUserRepository;
