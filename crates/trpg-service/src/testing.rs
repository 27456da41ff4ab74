//! In-memory repositories for tests
//!
//! All four repositories share one locked state so room deletion cascades
//! the same way the database foreign keys do. Enabled for unit tests and by
//! the `test-util` feature.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use trpg_common::auth::JwtService;
use trpg_core::entities::{CharacterSheet, MemberRole, Room, RoomMember, User};
use trpg_core::traits::{
    CharacterRepository, MemberRepository, RepoResult, RoomRepository, UserRepository,
};
use trpg_core::{DomainError, Snowflake, SnowflakeGenerator};

use crate::services::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    users: HashMap<Snowflake, (User, String)>,
    rooms: HashMap<Snowflake, Room>,
    members: Vec<RoomMember>,
    characters: Vec<CharacterSheet>,
    forced_code_collisions: usize,
}

type Shared = Arc<Mutex<State>>;

/// Handle to a shared in-memory store
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Shared,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.state.clone())
    }

    pub fn rooms(&self) -> InMemoryRoomRepository {
        InMemoryRoomRepository(self.state.clone())
    }

    pub fn members(&self) -> InMemoryMemberRepository {
        InMemoryMemberRepository(self.state.clone())
    }

    pub fn characters(&self) -> InMemoryCharacterRepository {
        InMemoryCharacterRepository(self.state.clone())
    }

    /// Make the next `n` room inserts fail with an invite code collision
    pub fn force_invite_code_collisions(&self, n: usize) {
        self.state.lock().forced_code_collisions = n;
    }

    /// Number of stored character sheets across all rooms
    pub fn character_count(&self) -> usize {
        self.state.lock().characters.len()
    }

    /// Build a service context over this store with the given JWT secret
    pub fn service_context(&self, jwt_secret: &str) -> ServiceContext {
        self.service_context_with(Arc::new(JwtService::new(jwt_secret, 3600)))
    }

    /// Build a service context over this store with a prepared JWT service
    pub fn service_context_with(&self, jwt_service: Arc<JwtService>) -> ServiceContext {
        let built = ServiceContextBuilder::new()
            .user_repo(Arc::new(self.users()))
            .room_repo(Arc::new(self.rooms()))
            .member_repo(Arc::new(self.members()))
            .character_repo(Arc::new(self.characters()))
            .jwt_service(jwt_service)
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build();
        match built {
            Ok(ctx) => ctx,
            Err(e) => unreachable!("all dependencies are set: {e}"),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

pub struct InMemoryUserRepository(Shared);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.0.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let state = self.0.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|(u, _)| u.clone()))
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.0.lock().users.values().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.0.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.0.lock();
        let (stored, _) = state
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.0.lock().users.get(&id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut state = self.0.lock();
        let (_, hash) = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        *hash = password_hash.to_string();
        Ok(())
    }
}

// ============================================================================
// Rooms
// ============================================================================

pub struct InMemoryRoomRepository(Shared);

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        Ok(self.0.lock().rooms.get(&id).cloned())
    }

    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Room>> {
        Ok(self
            .0
            .lock()
            .rooms
            .values()
            .find(|r| r.invite_code == code)
            .cloned())
    }

    async fn find_public(&self) -> RepoResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .0
            .lock()
            .rooms
            .values()
            .filter(|r| r.is_public)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rooms)
    }

    async fn create_with_dm(&self, room: &Room) -> RepoResult<()> {
        let mut state = self.0.lock();
        if state.forced_code_collisions > 0 {
            state.forced_code_collisions -= 1;
            return Err(DomainError::InviteCodeExists);
        }
        if state.rooms.values().any(|r| r.invite_code == room.invite_code) {
            return Err(DomainError::InviteCodeExists);
        }
        if !state.users.contains_key(&room.dm_id) {
            return Err(DomainError::UserNotFound(room.dm_id));
        }
        state.rooms.insert(room.id, room.clone());
        state.members.push(RoomMember::dm(room.id, room.dm_id));
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.0.lock();
        if state.rooms.remove(&id).is_none() {
            return Err(DomainError::RoomNotFound(id));
        }
        state.members.retain(|m| m.room_id != id);
        state.characters.retain(|c| c.room_id != id);
        Ok(())
    }

    async fn transfer_dm(&self, room_id: Snowflake, new_dm_id: Snowflake) -> RepoResult<()> {
        let mut state = self.0.lock();
        if !state.rooms.contains_key(&room_id) {
            return Err(DomainError::RoomNotFound(room_id));
        }
        if !state
            .members
            .iter()
            .any(|m| m.room_id == room_id && m.user_id == new_dm_id)
        {
            return Err(DomainError::MemberNotFound);
        }

        for member in state.members.iter_mut().filter(|m| m.room_id == room_id) {
            member.role = if member.user_id == new_dm_id {
                MemberRole::Dm
            } else {
                MemberRole::Player
            };
        }
        if let Some(room) = state.rooms.get_mut(&room_id) {
            room.transfer_to(new_dm_id);
        }
        Ok(())
    }
}

// ============================================================================
// Members
// ============================================================================

pub struct InMemoryMemberRepository(Shared);

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<RoomMember>> {
        let mut members: Vec<RoomMember> = self
            .0
            .lock()
            .members
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| (!m.is_dm(), m.joined_at, m.user_id));
        Ok(members)
    }

    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .0
            .lock()
            .members
            .iter()
            .any(|m| m.room_id == room_id && m.user_id == user_id))
    }

    async fn join(&self, member: &RoomMember) -> RepoResult<()> {
        let mut state = self.0.lock();
        let max_players = state
            .rooms
            .get(&member.room_id)
            .map(|r| r.max_players)
            .ok_or(DomainError::RoomNotFound(member.room_id))?;

        let in_room: Vec<&RoomMember> = state
            .members
            .iter()
            .filter(|m| m.room_id == member.room_id)
            .collect();
        if in_room.len() as i64 >= i64::from(max_players) {
            return Err(DomainError::RoomFull);
        }
        if in_room.iter().any(|m| m.user_id == member.user_id) {
            return Err(DomainError::AlreadyMember);
        }

        state.members.push(member.clone());
        Ok(())
    }

    async fn remove(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut state = self.0.lock();
        let before = state.members.len();
        state
            .members
            .retain(|m| !(m.room_id == room_id && m.user_id == user_id));
        if state.members.len() == before {
            return Err(DomainError::MemberNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Characters
// ============================================================================

pub struct InMemoryCharacterRepository(Shared);

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CharacterSheet>> {
        Ok(self
            .0
            .lock()
            .characters
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<CharacterSheet>> {
        Ok(self
            .0
            .lock()
            .characters
            .iter()
            .filter(|c| c.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn create(&self, sheet: &CharacterSheet) -> RepoResult<()> {
        let mut state = self.0.lock();
        if !state.rooms.contains_key(&sheet.room_id) {
            return Err(DomainError::RoomNotFound(sheet.room_id));
        }
        state.characters.push(sheet.clone());
        Ok(())
    }

    async fn update(&self, sheet: &CharacterSheet) -> RepoResult<()> {
        let mut state = self.0.lock();
        let stored = state
            .characters
            .iter_mut()
            .find(|c| c.id == sheet.id)
            .ok_or(DomainError::CharacterNotFound(sheet.id))?;
        *stored = sheet.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.0.lock();
        let before = state.characters.len();
        state.characters.retain(|c| c.id != id);
        if state.characters.len() == before {
            return Err(DomainError::CharacterNotFound(id));
        }
        Ok(())
    }
}
