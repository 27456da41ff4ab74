//! Character sheet handlers

use axum::extract::State;
use trpg_service::{CharacterRequest, CharacterResponse, CharacterService};

use crate::extractors::{AuthUser, CharacterPath, JsonBody, PathParams, RoomPath};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Create a character in a room the caller belongs to
///
/// The body is validated by the service once room and membership are checked.
///
/// POST /rooms/{room_id}/characters
pub async fn create_character(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
    JsonBody(request): JsonBody<CharacterRequest>,
) -> ApiResult<ApiResponse<CharacterResponse>> {
    let room_id = path.room_id()?;

    let service = CharacterService::new(state.service_context());
    let character = service
        .create_character(auth.user_id, room_id, request)
        .await?;
    Ok(ApiResponse::with_message("Character created successfully", character))
}

/// GET /rooms/{room_id}/characters
pub async fn list_characters(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(path): PathParams<RoomPath>,
) -> ApiResult<ApiResponse<Vec<CharacterResponse>>> {
    let room_id = path.room_id()?;

    let service = CharacterService::new(state.service_context());
    let characters = service.list_characters(room_id).await?;
    Ok(ApiResponse::ok(characters))
}

/// GET /rooms/{room_id}/characters/{character_id}
pub async fn get_character(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(path): PathParams<CharacterPath>,
) -> ApiResult<ApiResponse<CharacterResponse>> {
    let room_id = path.room_id()?;
    let character_id = path.character_id()?;

    let service = CharacterService::new(state.service_context());
    let character = service.get_character(room_id, character_id).await?;
    Ok(ApiResponse::ok(character))
}

/// Replace a character sheet (owner only)
///
/// PUT /rooms/{room_id}/characters/{character_id}
pub async fn update_character(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<CharacterPath>,
    JsonBody(request): JsonBody<CharacterRequest>,
) -> ApiResult<ApiResponse<CharacterResponse>> {
    let room_id = path.room_id()?;
    let character_id = path.character_id()?;

    let service = CharacterService::new(state.service_context());
    let character = service
        .update_character(auth.user_id, room_id, character_id, request)
        .await?;
    Ok(ApiResponse::with_message("Character updated successfully", character))
}

/// Delete a character sheet (owner only)
///
/// DELETE /rooms/{room_id}/characters/{character_id}
pub async fn delete_character(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<CharacterPath>,
) -> ApiResult<ApiResponse<()>> {
    let room_id = path.room_id()?;
    let character_id = path.character_id()?;

    let service = CharacterService::new(state.service_context());
    service
        .delete_character(auth.user_id, room_id, character_id)
        .await?;
    Ok(ApiResponse::message("Character deleted successfully"))
}
