//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod characters;
pub mod health;
pub mod rooms;
pub mod users;

use crate::response::ApiError;

/// Envelope for requests that match no route
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
