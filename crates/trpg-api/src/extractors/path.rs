//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};
use trpg_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with rejections mapped onto the error envelope
#[derive(Debug, Clone)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(PathParams(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// `/rooms/:room_id`
#[derive(Debug, Deserialize)]
pub struct RoomPath {
    pub room_id: String,
}

impl RoomPath {
    pub fn room_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.room_id, "room_id")
    }
}

/// `/rooms/:room_id/members/:user_id`
#[derive(Debug, Deserialize)]
pub struct RoomMemberPath {
    pub room_id: String,
    pub user_id: String,
}

impl RoomMemberPath {
    pub fn room_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.room_id, "room_id")
    }

    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// `/rooms/:room_id/characters/:character_id`
#[derive(Debug, Deserialize)]
pub struct CharacterPath {
    pub room_id: String,
    pub character_id: String,
}

impl CharacterPath {
    pub fn room_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.room_id, "room_id")
    }

    pub fn character_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.character_id, "character_id")
    }
}

/// `/rooms/join/:code`
#[derive(Debug, Deserialize)]
pub struct InviteCodePath {
    pub code: String,
}
