//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path parameters and validated bodies.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{CharacterPath, InviteCodePath, PathParams, RoomMemberPath, RoomPath};
pub use validated::{JsonBody, ValidatedJson};
