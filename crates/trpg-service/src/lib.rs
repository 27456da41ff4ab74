//! # trpg-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use dto::*;
pub use services::{
    AuthService, CharacterService, Identity, RoomService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
