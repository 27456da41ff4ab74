//! Room service
//!
//! Handles room creation, discovery, membership and DM hand-over.

use std::collections::HashMap;

use trpg_common::auth::hash_password;
use trpg_core::entities::{generate_invite_code, Room, RoomMember};
use trpg_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateRoomRequest, MemberResponse, MemberWithUser, MembershipResponse, RoomResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at finding an unused invite code before giving up
pub const INVITE_CODE_ATTEMPTS: usize = 5;

/// Room service
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    /// Create a new RoomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a room or fail with `RoomNotFound`
    pub async fn get_room_entity(&self, room_id: Snowflake) -> ServiceResult<Room> {
        Ok(self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?)
    }

    /// Create a room owned by `owner_id`, who becomes its DM
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_room(
        &self,
        owner_id: Snowflake,
        request: CreateRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation("Room name is required"));
        }

        let max_players = request.max_players.unwrap_or(Room::DEFAULT_MAX_PLAYERS);
        if !(Room::MIN_PLAYERS..=Room::MAX_PLAYERS).contains(&max_players) {
            return Err(ServiceError::validation(format!(
                "max_players must be between {} and {}",
                Room::MIN_PLAYERS,
                Room::MAX_PLAYERS
            )));
        }

        let password_hash = match request.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let room_id = self.ctx.generate_id();
        let mut room = Room::new(room_id, owner_id, name, String::new());
        room.description = request.description.filter(|d| !d.is_empty());
        if let Some(rule_system) = request.rule_system.filter(|r| !r.trim().is_empty()) {
            room.rule_system = rule_system;
        }
        room.is_public = request.is_public.unwrap_or(false);
        room.password_hash = password_hash;
        room.max_players = max_players;

        for attempt in 1..=INVITE_CODE_ATTEMPTS {
            room.invite_code = generate_invite_code();

            match self.ctx.room_repo().create_with_dm(&room).await {
                Ok(()) => {
                    info!(
                        room_id = %room.id,
                        dm_id = %owner_id,
                        invite_code = %room.invite_code,
                        "Room created successfully"
                    );
                    return Ok(RoomResponse::for_member(&room));
                }
                Err(DomainError::InviteCodeExists) => {
                    warn!(attempt, "Invite code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "Failed to generate a unique invite code",
        ))
    }

    /// Public rooms, newest first
    #[instrument(skip(self))]
    pub async fn list_public_rooms(&self) -> ServiceResult<Vec<RoomResponse>> {
        let rooms = self.ctx.room_repo().find_public().await?;
        Ok(rooms.iter().map(RoomResponse::from).collect())
    }

    /// Get a room; members also see the invite code
    #[instrument(skip(self))]
    pub async fn get_room(
        &self,
        room_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<RoomResponse> {
        let room = self.get_room_entity(room_id).await?;

        let is_member = match viewer {
            Some(user_id) => self.ctx.member_repo().is_member(room_id, user_id).await?,
            None => false,
        };

        Ok(if is_member {
            RoomResponse::for_member(&room)
        } else {
            RoomResponse::from(&room)
        })
    }

    /// Join a room by id as a player
    #[instrument(skip(self))]
    pub async fn join_room(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        let room = self.get_room_entity(room_id).await?;
        self.add_player(&room, user_id).await
    }

    /// Join a room by invite code
    #[instrument(skip(self))]
    pub async fn join_room_by_code(
        &self,
        user_id: Snowflake,
        invite_code: &str,
    ) -> ServiceResult<MembershipResponse> {
        let code = invite_code.trim().to_uppercase();
        let room = self
            .ctx
            .room_repo()
            .find_by_invite_code(&code)
            .await?
            .ok_or(DomainError::InviteCodeNotFound(code))?;

        self.add_player(&room, user_id).await
    }

    /// Insert a player membership; capacity and duplicates are checked atomically by the store
    async fn add_player(&self, room: &Room, user_id: Snowflake) -> ServiceResult<MembershipResponse> {
        let member = RoomMember::player(room.id, user_id);
        self.ctx.member_repo().join(&member).await?;

        info!(room_id = %room.id, user_id = %user_id, "Joined room successfully");
        Ok(MembershipResponse::from(&member))
    }

    /// Leave a room. The DM must delete the room or transfer it first.
    #[instrument(skip(self))]
    pub async fn leave_room(&self, user_id: Snowflake, room_id: Snowflake) -> ServiceResult<()> {
        let room = self.get_room_entity(room_id).await?;

        if room.is_dm(user_id) {
            return Err(DomainError::CannotLeaveAsDm.into());
        }
        if !self.ctx.member_repo().is_member(room_id, user_id).await? {
            return Err(DomainError::NotInRoom.into());
        }

        self.ctx.member_repo().remove(room_id, user_id).await?;

        info!(room_id = %room_id, user_id = %user_id, "Left room successfully");
        Ok(())
    }

    /// Delete a room with its memberships and character sheets
    #[instrument(skip(self))]
    pub async fn delete_room(&self, user_id: Snowflake, room_id: Snowflake) -> ServiceResult<()> {
        let room = self.get_room_entity(room_id).await?;

        if !room.is_dm(user_id) {
            return Err(DomainError::NotRoomDm.into());
        }

        self.ctx.room_repo().delete(room_id).await?;

        info!(room_id = %room_id, dm_id = %user_id, "Room deleted successfully");
        Ok(())
    }

    /// Remove a player from the room
    #[instrument(skip(self))]
    pub async fn kick_member(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<()> {
        let room = self.get_room_entity(room_id).await?;

        if !room.is_dm(user_id) {
            return Err(DomainError::NotRoomDm.into());
        }
        if room.is_dm(target_id) {
            return Err(DomainError::CannotKickDm.into());
        }

        self.ctx.member_repo().remove(room_id, target_id).await?;

        info!(room_id = %room_id, target_id = %target_id, "Member kicked successfully");
        Ok(())
    }

    /// Hand the DM role to another member
    #[instrument(skip(self))]
    pub async fn transfer_dm(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
        new_dm_id: Snowflake,
    ) -> ServiceResult<()> {
        let room = self.get_room_entity(room_id).await?;

        if !room.is_dm(user_id) {
            return Err(DomainError::NotRoomDm.into());
        }
        if room.is_dm(new_dm_id) {
            return Err(DomainError::AlreadyDm.into());
        }
        if !self.ctx.member_repo().is_member(room_id, new_dm_id).await? {
            return Err(DomainError::MemberNotFound.into());
        }

        self.ctx.room_repo().transfer_dm(room_id, new_dm_id).await?;

        info!(room_id = %room_id, old_dm = %user_id, new_dm = %new_dm_id, "DM transferred successfully");
        Ok(())
    }

    /// Members with their profiles, DM first then by join time
    #[instrument(skip(self))]
    pub async fn list_members(&self, room_id: Snowflake) -> ServiceResult<Vec<MemberResponse>> {
        self.get_room_entity(room_id).await?;

        let members = self.ctx.member_repo().find_by_room(room_id).await?;
        let user_ids: Vec<Snowflake> = members.iter().map(|m| m.user_id).collect();
        let users: HashMap<Snowflake, _> = self
            .ctx
            .user_repo()
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(members
            .iter()
            .filter_map(|member| {
                users
                    .get(&member.user_id)
                    .map(|user| MemberResponse::from(MemberWithUser { member, user }))
            })
            .collect())
    }
}
