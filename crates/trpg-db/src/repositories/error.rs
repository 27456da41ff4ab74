//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use trpg_core::error::DomainError;
use trpg_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Check for foreign key violation (the referenced row vanished) or fallback
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    map_db_error(e)
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn room_not_found(id: Snowflake) -> DomainError {
    DomainError::RoomNotFound(id)
}

pub fn member_not_found() -> DomainError {
    DomainError::MemberNotFound
}

pub fn character_not_found(id: Snowflake) -> DomainError {
    DomainError::CharacterNotFound(id)
}
