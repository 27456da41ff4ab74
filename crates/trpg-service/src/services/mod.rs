//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod character;
pub mod context;
pub mod error;
pub mod room;
pub mod user;

// Re-export all services for convenience
pub use auth::{AuthService, Identity};
pub use character::CharacterService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use room::{RoomService, INVITE_CODE_ATTEMPTS};
pub use user::UserService;
