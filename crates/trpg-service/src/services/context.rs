//! Service context - dependency container for services
//!
//! Holds the repositories, the JWT service and the id generator needed by services.

use std::sync::Arc;

use trpg_common::auth::JwtService;
use trpg_core::traits::{CharacterRepository, MemberRepository, RoomRepository, UserRepository};
use trpg_core::{Snowflake, SnowflakeGenerator};
use trpg_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Built once at startup and shared behind an `Arc` by every request.
/// The pool is optional so the same services can run over in-memory
/// repositories.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (readiness check only; data access goes through repositories)
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    room_repo: Arc<dyn RoomRepository>,
    member_repo: Arc<dyn MemberRepository>,
    character_repo: Arc<dyn CharacterRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        room_repo: Arc<dyn RoomRepository>,
        member_repo: Arc<dyn MemberRepository>,
        character_repo: Arc<dyn CharacterRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            room_repo,
            member_repo,
            character_repo,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Check that the database answers `SELECT 1`.
    ///
    /// Always true when no pool is configured.
    pub async fn database_ready(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the character sheet repository
    pub fn character_repo(&self) -> &dyn CharacterRepository {
        self.character_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    room_repo: Option<Arc<dyn RoomRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    character_repo: Option<Arc<dyn CharacterRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn character_repo(mut self, repo: Arc<dyn CharacterRepository>) -> Self {
        self.character_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.room_repo
                .ok_or_else(|| ServiceError::validation("room_repo is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.character_repo
                .ok_or_else(|| ServiceError::validation("character_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
