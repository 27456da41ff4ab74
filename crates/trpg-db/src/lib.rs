//! # trpg-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `trpg-core`. It handles:
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trpg_db::pool::{create_pool, run_migrations, PoolConfig};
//! use trpg_db::repositories::PgRoomRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let rooms = PgRoomRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCharacterRepository, PgMemberRepository, PgRoomRepository, PgUserRepository,
};
