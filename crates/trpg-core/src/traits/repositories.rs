//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{CharacterSheet, Room, RoomMember, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find all users whose id is in `ids` (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user.
    ///
    /// Fails with `EmailAlreadyExists` if the email is taken.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update nickname and avatar
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>>;

    /// Find room by invite code
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Room>>;

    /// List public rooms, newest first
    async fn find_public(&self) -> RepoResult<Vec<Room>>;

    /// Insert the room together with its DM membership, atomically.
    ///
    /// Fails with `InviteCodeExists` when the invite code collides.
    async fn create_with_dm(&self, room: &Room) -> RepoResult<()>;

    /// Delete a room; memberships and character sheets go with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Make `new_dm_id` the room's DM and demote the previous one to player,
    /// atomically. `new_dm_id` must already be a member.
    async fn transfer_dm(&self, room_id: Snowflake, new_dm_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List members of a room, DM first, then by join time
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<RoomMember>>;

    /// Check if user is a member of the room
    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Seat a member if the room still has capacity.
    ///
    /// The capacity check and the insert are atomic with respect to other
    /// joins on the same room. Fails with `RoomNotFound`, then `RoomFull`,
    /// then `AlreadyMember`.
    async fn join(&self, member: &RoomMember) -> RepoResult<()>;

    /// Remove a membership. Fails with `MemberNotFound` if there is none.
    async fn remove(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Character Repository
// ============================================================================

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Find character sheet by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CharacterSheet>>;

    /// List sheets of a room, oldest first
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<CharacterSheet>>;

    /// Create a new character sheet
    async fn create(&self, sheet: &CharacterSheet) -> RepoResult<()>;

    /// Overwrite every mutable field of an existing sheet
    async fn update(&self, sheet: &CharacterSheet) -> RepoResult<()>;

    /// Delete a character sheet
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
