//! Character sheet service
//!
//! Sheets are scoped to a room; members create them and only the owner may change them.

use trpg_core::entities::CharacterSheet;
use trpg_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CharacterRequest, CharacterResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Character sheet service
pub struct CharacterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CharacterService<'a> {
    /// Create a new CharacterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn ensure_room_exists(&self, room_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.room_repo().find_by_id(room_id).await?.is_none() {
            return Err(DomainError::RoomNotFound(room_id).into());
        }
        Ok(())
    }

    /// Load a sheet, treating a sheet from another room as missing
    async fn load(&self, room_id: Snowflake, character_id: Snowflake) -> ServiceResult<CharacterSheet> {
        let sheet = self
            .ctx
            .character_repo()
            .find_by_id(character_id)
            .await?
            .filter(|sheet| sheet.belongs_to(room_id))
            .ok_or(DomainError::CharacterNotFound(character_id))?;
        Ok(sheet)
    }

    fn ensure_owner(sheet: &CharacterSheet, user_id: Snowflake) -> ServiceResult<()> {
        if !sheet.is_owned_by(user_id) {
            return Err(DomainError::NotCharacterOwner.into());
        }
        Ok(())
    }

    /// Create a sheet in a room the caller belongs to
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_character(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
        request: CharacterRequest,
    ) -> ServiceResult<CharacterResponse> {
        self.ensure_room_exists(room_id).await?;

        if !self.ctx.member_repo().is_member(room_id, user_id).await? {
            return Err(DomainError::NotRoomMember.into());
        }
        request.validate()?;

        let sheet = request.into_sheet(self.ctx.generate_id(), room_id, user_id);
        ensure_named(&sheet)?;

        self.ctx.character_repo().create(&sheet).await?;

        info!(character_id = %sheet.id, room_id = %room_id, user_id = %user_id, "Character created successfully");
        Ok(CharacterResponse::from(sheet))
    }

    /// All sheets of a room, oldest first
    #[instrument(skip(self))]
    pub async fn list_characters(&self, room_id: Snowflake) -> ServiceResult<Vec<CharacterResponse>> {
        self.ensure_room_exists(room_id).await?;

        let sheets = self.ctx.character_repo().find_by_room(room_id).await?;
        Ok(sheets.iter().map(CharacterResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_character(
        &self,
        room_id: Snowflake,
        character_id: Snowflake,
    ) -> ServiceResult<CharacterResponse> {
        let sheet = self.load(room_id, character_id).await?;
        Ok(CharacterResponse::from(sheet))
    }

    /// Replace every mutable field; omitted fields fall back to defaults
    #[instrument(skip(self, request))]
    pub async fn update_character(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
        character_id: Snowflake,
        request: CharacterRequest,
    ) -> ServiceResult<CharacterResponse> {
        let mut sheet = self.load(room_id, character_id).await?;
        Self::ensure_owner(&sheet, user_id)?;
        request.validate()?;

        let replacement = request.into_sheet(sheet.id, sheet.room_id, sheet.user_id);
        ensure_named(&replacement)?;
        sheet.replace_with(replacement);

        self.ctx.character_repo().update(&sheet).await?;

        info!(character_id = %character_id, "Character updated successfully");
        Ok(CharacterResponse::from(sheet))
    }

    #[instrument(skip(self))]
    pub async fn delete_character(
        &self,
        user_id: Snowflake,
        room_id: Snowflake,
        character_id: Snowflake,
    ) -> ServiceResult<()> {
        let sheet = self.load(room_id, character_id).await?;
        Self::ensure_owner(&sheet, user_id)?;

        self.ctx.character_repo().delete(character_id).await?;

        info!(character_id = %character_id, "Character deleted successfully");
        Ok(())
    }
}

/// Field validation accepts a whitespace-only name; the sheet does not
fn ensure_named(sheet: &CharacterSheet) -> Result<(), DomainError> {
    if sheet.name.trim().is_empty() {
        return Err(DomainError::ValidationError("Name is required".into()));
    }
    Ok(())
}
