//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trpg_core::entities::{MemberRole, Room};
use trpg_core::error::DomainError;
use trpg_core::traits::{RepoResult, RoomRepository};
use trpg_core::value_objects::Snowflake;

use crate::models::RoomModel;

use super::error::{map_db_error, member_not_found, room_not_found, user_not_found};

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT id, name, description, rule_system, is_public, password_hash,
                   max_players, invite_code, dm_id, created_at, updated_at
            FROM rooms
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT id, name, description, rule_system, is_public, password_hash,
                   max_players, invite_code, dm_id, created_at, updated_at
            FROM rooms
            WHERE invite_code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn find_public(&self) -> RepoResult<Vec<Room>> {
        let results = sqlx::query_as::<_, RoomModel>(
            r"
            SELECT id, name, description, rule_system, is_public, password_hash,
                   max_players, invite_code, dm_id, created_at, updated_at
            FROM rooms
            WHERE is_public
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self, room), fields(room_id = %room.id))]
    async fn create_with_dm(&self, room: &Room) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO rooms (id, name, description, rule_system, is_public, password_hash,
                               max_players, invite_code, dm_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(room.id.into_inner())
        .bind(&room.name)
        .bind(&room.description)
        .bind(&room.rule_system)
        .bind(room.is_public)
        .bind(&room.password_hash)
        .bind(room.max_players)
        .bind(&room.invite_code)
        .bind(room.dm_id.into_inner())
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => DomainError::InviteCodeExists,
            Some(db) if db.is_foreign_key_violation() => user_not_found(room.dm_id),
            _ => map_db_error(e),
        })?;

        sqlx::query(
            r"
            INSERT INTO room_members (room_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(room.id.into_inner())
        .bind(room.dm_id.into_inner())
        .bind(MemberRole::Dm.as_str())
        .bind(room.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM rooms WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(room_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transfer_dm(&self, room_id: Snowflake, new_dm_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let old_dm_id = sqlx::query_scalar::<_, i64>(
            r"
            SELECT dm_id FROM rooms WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(room_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| room_not_found(room_id))?;

        let promoted = sqlx::query(
            r"
            UPDATE room_members SET role = $3
            WHERE room_id = $1 AND user_id = $2
            ",
        )
        .bind(room_id.into_inner())
        .bind(new_dm_id.into_inner())
        .bind(MemberRole::Dm.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if promoted.rows_affected() == 0 {
            return Err(member_not_found());
        }

        if old_dm_id != new_dm_id.into_inner() {
            sqlx::query(
                r"
                UPDATE room_members SET role = $3
                WHERE room_id = $1 AND user_id = $2
                ",
            )
            .bind(room_id.into_inner())
            .bind(old_dm_id)
            .bind(MemberRole::Player.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r"
            UPDATE rooms SET dm_id = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(room_id.into_inner())
        .bind(new_dm_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
