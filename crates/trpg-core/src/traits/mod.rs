//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CharacterRepository, MemberRepository, RepoResult, RoomRepository, UserRepository,
};
