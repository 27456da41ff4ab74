//! User service
//!
//! Handles profile reads, profile updates and password changes.

use trpg_common::auth::{hash_password, validate_password_length, verify_password};
use trpg_core::entities::User;
use trpg_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{ProfileResponse, UpdatePasswordRequest, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Get the caller's profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self.load(user_id).await?;
        Ok(ProfileResponse::from(&user))
    }

    /// Apply the supplied, non-empty profile fields
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut user = self.load(user_id).await?;

        let nickname = request.nickname.as_deref().map(str::trim);
        let avatar = request.avatar.as_deref().map(str::trim);

        if user.apply_profile(nickname, avatar) {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "Profile updated");
        }

        Ok(ProfileResponse::from(&user))
    }

    /// Change the caller's password after verifying the old one
    #[instrument(skip(self, request))]
    pub async fn update_password(
        &self,
        user_id: Snowflake,
        request: UpdatePasswordRequest,
    ) -> ServiceResult<()> {
        validate_password_length(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(&request.old_password, &current_hash)? {
            warn!(user_id = %user_id, "Password change rejected: old password mismatch");
            return Err(DomainError::IncorrectPassword.into());
        }

        let new_hash = hash_password(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user_id, &new_hash)
            .await?;

        info!(user_id = %user_id, "Password updated");
        Ok(())
    }
}
