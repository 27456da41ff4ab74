//! Authentication service
//!
//! Handles user registration, login and bearer token resolution.

use trpg_common::auth::{hash_password, validate_password_length, verify_password};
use trpg_common::AppError;
use trpg_core::entities::User;
use trpg_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Snowflake,
    pub email: String,
}

/// Emails are compared case-insensitively
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        validate_password_length(&request.password)?;

        let email = normalize_email(&request.email);
        let nickname = request.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(ServiceError::validation("Nickname is required"));
        }

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), email, nickname);

        // The unique index still catches a concurrent registration
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse::from(&user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let token = self
            .ctx
            .jwt_service()
            .generate_token(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse {
            user_id: user.id.to_string(),
            email: user.email,
            nickname: user.nickname,
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        })
    }

    /// Resolve a raw bearer token into the caller's identity
    ///
    /// # Errors
    /// `InvalidToken` for bad signatures or malformed claims, `TokenExpired`
    /// once `exp` has passed.
    pub fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(Identity {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}
