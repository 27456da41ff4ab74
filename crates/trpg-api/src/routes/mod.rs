//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{self, auth, characters, health, rooms, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .fallback(handlers::not_found)
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(room_routes())
        .merge(character_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// Current user routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/user/password", put(users::update_password))
}

/// Room routes
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(rooms::create_room).get(rooms::list_rooms))
        .route("/rooms/join/:code", post(rooms::join_room_by_code))
        .route(
            "/rooms/:room_id",
            get(rooms::get_room).delete(rooms::delete_room),
        )
        .route("/rooms/:room_id/members", get(rooms::list_members))
        .route("/rooms/:room_id/join", post(rooms::join_room))
        .route("/rooms/:room_id/leave", post(rooms::leave_room))
        .route(
            "/rooms/:room_id/members/:user_id/kick",
            put(rooms::kick_member),
        )
        .route("/rooms/:room_id/transfer-dm", put(rooms::transfer_dm))
}

/// Character sheet routes
fn character_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rooms/:room_id/characters",
            post(characters::create_character).get(characters::list_characters),
        )
        .route(
            "/rooms/:room_id/characters/:character_id",
            get(characters::get_character)
                .put(characters::update_character)
                .delete(characters::delete_character),
        )
}
