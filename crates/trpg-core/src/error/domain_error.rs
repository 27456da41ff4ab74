//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Room not found: {0}")]
    RoomNotFound(Snowflake),

    #[error("No room with invite code {0}")]
    InviteCodeNotFound(String),

    #[error("Target user not found in room")]
    MemberNotFound,

    #[error("Character not found: {0}")]
    CharacterNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Bad Requests (rule violations the caller can fix)
    // =========================================================================
    #[error("Not in room")]
    NotInRoom,

    #[error("Cannot kick the DM")]
    CannotKickDm,

    #[error("User is already the DM")]
    AlreadyDm,

    #[error("Old password is incorrect")]
    IncorrectPassword,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the DM can perform this action")]
    NotRoomDm,

    #[error("Only the character owner can modify this character")]
    NotCharacterOwner,

    #[error("You are not a member of this room")]
    NotRoomMember,

    #[error("DM cannot leave room without deleting or transferring")]
    CannotLeaveAsDm,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Already in room")]
    AlreadyMember,

    #[error("Room is full")]
    RoomFull,

    #[error("Invite code already exists")]
    InviteCodeExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::InviteCodeNotFound(_) => "UNKNOWN_INVITE",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::CharacterNotFound(_) => "UNKNOWN_CHARACTER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Bad Request
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::CannotKickDm => "CANNOT_KICK_DM",
            Self::AlreadyDm => "ALREADY_DM",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",

            // Authorization
            Self::NotRoomDm => "NOT_ROOM_DM",
            Self::NotCharacterOwner => "NOT_CHARACTER_OWNER",
            Self::NotRoomMember => "NOT_ROOM_MEMBER",
            Self::CannotLeaveAsDm => "CANNOT_LEAVE_AS_DM",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::RoomFull => "ROOM_FULL",
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RoomNotFound(_)
                | Self::InviteCodeNotFound(_)
                | Self::MemberNotFound
                | Self::CharacterNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a rule violation reported as a bad request
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::NotInRoom | Self::CannotKickDm | Self::AlreadyDm | Self::IncorrectPassword
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotRoomDm
                | Self::NotCharacterOwner
                | Self::NotRoomMember
                | Self::CannotLeaveAsDm
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::AlreadyMember | Self::RoomFull | Self::InviteCodeExists
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::RoomNotFound(Snowflake::new(1)).code(), "UNKNOWN_ROOM");
        assert_eq!(DomainError::RoomFull.code(), "ROOM_FULL");
        assert_eq!(DomainError::CannotLeaveAsDm.code(), "CANNOT_LEAVE_AS_DM");
    }

    #[test]
    fn test_classification_is_exclusive() {
        let errors = [
            DomainError::UserNotFound(Snowflake::new(1)),
            DomainError::MemberNotFound,
            DomainError::ValidationError("name".to_string()),
            DomainError::NotInRoom,
            DomainError::CannotKickDm,
            DomainError::NotRoomDm,
            DomainError::CannotLeaveAsDm,
            DomainError::RoomFull,
            DomainError::AlreadyMember,
        ];

        for err in &errors {
            let hits = [
                err.is_not_found(),
                err.is_validation(),
                err.is_bad_request(),
                err.is_authorization(),
                err.is_conflict(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{err:?} should fall in exactly one class");
        }
    }

    #[test]
    fn test_infrastructure_errors_are_unclassified() {
        let err = DomainError::DatabaseError("connection reset".to_string());
        assert!(!err.is_not_found());
        assert!(!err.is_conflict());
        assert!(!err.is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::CharacterNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Character not found: 123");

        assert_eq!(DomainError::RoomFull.to_string(), "Room is full");
        assert_eq!(
            DomainError::CannotLeaveAsDm.to_string(),
            "DM cannot leave room without deleting or transferring"
        );
    }
}
