//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use trpg_core::entities::{CharacterSheet, Room, RoomMember, User};

use super::responses::{
    CharacterResponse, MemberResponse, MembershipResponse, ProfileResponse, RegisterResponse,
    RoomResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl From<&User> for RegisterResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
        }
    }
}

// ============================================================================
// Room Mappers
// ============================================================================

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            name: room.name.clone(),
            description: room.description.clone(),
            rule_system: room.rule_system.clone(),
            is_public: room.is_public,
            has_password: room.has_password(),
            max_players: room.max_players,
            invite_code: None,
            dm_id: room.dm_id.to_string(),
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

impl RoomResponse {
    /// Room view for members, including the invite code
    pub fn for_member(room: &Room) -> Self {
        Self {
            invite_code: Some(room.invite_code.clone()),
            ..Self::from(room)
        }
    }
}

impl From<&RoomMember> for MembershipResponse {
    fn from(member: &RoomMember) -> Self {
        Self {
            room_id: member.room_id.to_string(),
            user_id: member.user_id.to_string(),
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

/// Member joined with its user profile
pub struct MemberWithUser<'a> {
    pub member: &'a RoomMember,
    pub user: &'a User,
}

impl From<MemberWithUser<'_>> for MemberResponse {
    fn from(data: MemberWithUser<'_>) -> Self {
        Self {
            user_id: data.member.user_id.to_string(),
            nickname: data.user.nickname.clone(),
            avatar: data.user.avatar.clone(),
            role: data.member.role,
            joined_at: data.member.joined_at,
        }
    }
}

// ============================================================================
// Character Mappers
// ============================================================================

impl From<&CharacterSheet> for CharacterResponse {
    fn from(sheet: &CharacterSheet) -> Self {
        Self {
            id: sheet.id.to_string(),
            room_id: sheet.room_id.to_string(),
            user_id: sheet.user_id.to_string(),
            name: sheet.name.clone(),
            race: sheet.race.clone(),
            class: sheet.class.clone(),
            level: sheet.level,
            background: sheet.background.clone(),
            alignment: sheet.alignment.clone(),
            strength: sheet.abilities.strength,
            dexterity: sheet.abilities.dexterity,
            constitution: sheet.abilities.constitution,
            intelligence: sheet.abilities.intelligence,
            wisdom: sheet.abilities.wisdom,
            charisma: sheet.abilities.charisma,
            armor_class: sheet.armor_class,
            hit_points: sheet.hit_points,
            max_hit_points: sheet.max_hit_points,
            speed: sheet.speed,
            proficiency_bonus: sheet.proficiency_bonus,
            skills: sheet.skills.clone(),
            saving_throws: sheet.saving_throws.clone(),
            equipment: sheet.equipment.clone(),
            spells: sheet.spells.clone(),
            created_at: sheet.created_at,
            updated_at: sheet.updated_at,
        }
    }
}

impl From<CharacterSheet> for CharacterResponse {
    fn from(sheet: CharacterSheet) -> Self {
        Self::from(&sheet)
    }
}
