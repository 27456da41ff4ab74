//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use trpg_core::entities::RoomMember;
use trpg_core::error::DomainError;
use trpg_core::traits::{MemberRepository, RepoResult};
use trpg_core::value_objects::Snowflake;

use crate::models::RoomMemberModel;

use super::error::{map_db_error, map_unique_violation, member_not_found, room_not_found};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<RoomMember>> {
        let results = sqlx::query_as::<_, RoomMemberModel>(
            r"
            SELECT room_id, user_id, role, joined_at
            FROM room_members
            WHERE room_id = $1
            ORDER BY (role = 'dm') DESC, joined_at, user_id
            ",
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(RoomMember::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM room_members WHERE room_id = $1 AND user_id = $2)
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, member), fields(room_id = %member.room_id, user_id = %member.user_id))]
    async fn join(&self, member: &RoomMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent joins on the same room
        let max_players = sqlx::query_scalar::<_, i32>(
            r"
            SELECT max_players FROM rooms WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(member.room_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| room_not_found(member.room_id))?;

        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM room_members WHERE room_id = $1
            ",
        )
        .bind(member.room_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if count >= i64::from(max_players) {
            debug!(count, max_players, "room at capacity");
            return Err(DomainError::RoomFull);
        }

        let already_member = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM room_members WHERE room_id = $1 AND user_id = $2)
            ",
        )
        .bind(member.room_id.into_inner())
        .bind(member.user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_member {
            return Err(DomainError::AlreadyMember);
        }

        sqlx::query(
            r"
            INSERT INTO room_members (room_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(member.room_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM room_members WHERE room_id = $1 AND user_id = $2
            ",
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }
}
