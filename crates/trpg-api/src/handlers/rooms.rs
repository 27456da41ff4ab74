//! Room handlers
//!
//! Endpoints for room lifecycle, membership and DM hand-over.

use axum::extract::State;
use trpg_service::{
    CreateRoomRequest, MemberResponse, MembershipResponse, RoomResponse,
    RoomService, TransferDmRequest,
};

use crate::extractors::{
    AuthUser, InviteCodePath, OptionalAuthUser, PathParams, RoomMemberPath, RoomPath,
    ValidatedJson,
};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Create a room; the caller becomes its DM
///
/// POST /rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<ApiResponse<RoomResponse>> {
    let service = RoomService::new(state.service_context());
    let room = service.create_room(auth.user_id, request).await?;
    Ok(ApiResponse::with_message("Room created successfully", room))
}

/// List public rooms, newest first
///
/// GET /rooms
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<RoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let rooms = service.list_public_rooms().await?;
    Ok(ApiResponse::ok(rooms))
}

/// Get a room; members also see the invite code
///
/// GET /rooms/{room_id}
pub async fn get_room(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<RoomResponse>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    let room = service.get_room(room_id, viewer.user_id()).await?;
    Ok(ApiResponse::ok(room))
}

/// List room members, DM first
///
/// GET /rooms/{room_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<Vec<MemberResponse>>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    let members = service.list_members(room_id).await?;
    Ok(ApiResponse::ok(members))
}

/// Join a room by id as a player
///
/// POST /rooms/{room_id}/join
pub async fn join_room(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<MembershipResponse>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    let membership = service.join_room(auth.user_id, room_id).await?;
    Ok(ApiResponse::with_message("Joined room successfully", membership))
}

/// Join a room by invite code
///
/// POST /rooms/join/{code}
pub async fn join_room_by_code(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<InviteCodePath>,
) -> ApiResult<ApiResponse<MembershipResponse>> {
    let service = RoomService::new(state.service_context());
    let membership = service.join_room_by_code(auth.user_id, &path.code).await?;
    Ok(ApiResponse::with_message("Joined room successfully", membership))
}

/// Leave a room
///
/// POST /rooms/{room_id}/leave
pub async fn leave_room(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<()>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    service.leave_room(auth.user_id, room_id).await?;
    Ok(ApiResponse::message("Left room successfully"))
}

/// Delete a room with its members and characters (DM only)
///
/// DELETE /rooms/{room_id}
pub async fn delete_room(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<()>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    service.delete_room(auth.user_id, room_id).await?;
    Ok(ApiResponse::message("Room deleted successfully"))
}

/// Remove a player from the room (DM only)
///
/// PUT /rooms/{room_id}/members/{user_id}/kick
pub async fn kick_member(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomMemberPath>,
) -> ApiResult<ApiResponse<()>> {
    let room_id = path.room_id()?;
    let target_id = path.user_id()?;

    let service = RoomService::new(state.service_context());
    service.kick_member(auth.user_id, room_id, target_id).await?;
    Ok(ApiResponse::message("Member kicked successfully"))
}

/// Hand the DM role to another member (DM only)
///
/// PUT /rooms/{room_id}/transfer-dm
pub async fn transfer_dm(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
    ValidatedJson(request): ValidatedJson<TransferDmRequest>,
) -> ApiResult<ApiResponse<()>> {
    let room_id = path.room_id()?;

    let service = RoomService::new(state.service_context());
    service
        .transfer_dm(auth.user_id, room_id, request.user_id)
        .await?;
    Ok(ApiResponse::message("DM transferred successfully"))
}
