//! PostgreSQL implementation of CharacterRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use trpg_core::entities::CharacterSheet;
use trpg_core::traits::{CharacterRepository, RepoResult};
use trpg_core::value_objects::Snowflake;

use crate::mappers::json_or_null;
use crate::models::CharacterSheetModel;

use super::error::{character_not_found, map_db_error, map_foreign_key_violation, room_not_found};

const SELECT_COLUMNS: &str = r"
    SELECT id, room_id, user_id, name, race, class, level, background, alignment,
           strength, dexterity, constitution, intelligence, wisdom, charisma,
           armor_class, hit_points, max_hit_points, speed, proficiency_bonus,
           skills, saving_throws, equipment, spells, created_at, updated_at
    FROM character_sheets
";

/// PostgreSQL implementation of CharacterRepository
#[derive(Clone)]
pub struct PgCharacterRepository {
    pool: PgPool,
}

impl PgCharacterRepository {
    /// Create a new PgCharacterRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CharacterRepository for PgCharacterRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CharacterSheet>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        let result = sqlx::query_as::<_, CharacterSheetModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(CharacterSheet::from))
    }

    #[instrument(skip(self))]
    async fn find_by_room(&self, room_id: Snowflake) -> RepoResult<Vec<CharacterSheet>> {
        let query = format!("{SELECT_COLUMNS} WHERE room_id = $1 ORDER BY created_at, id");
        let results = sqlx::query_as::<_, CharacterSheetModel>(&query)
            .bind(room_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(CharacterSheet::from).collect())
    }

    #[instrument(skip(self, sheet), fields(character_id = %sheet.id, room_id = %sheet.room_id))]
    async fn create(&self, sheet: &CharacterSheet) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO character_sheets (
                id, room_id, user_id, name, race, class, level, background, alignment,
                strength, dexterity, constitution, intelligence, wisdom, charisma,
                armor_class, hit_points, max_hit_points, speed, proficiency_bonus,
                skills, saving_throws, equipment, spells, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
            ",
        )
        .bind(sheet.id.into_inner())
        .bind(sheet.room_id.into_inner())
        .bind(sheet.user_id.into_inner())
        .bind(&sheet.name)
        .bind(&sheet.race)
        .bind(&sheet.class)
        .bind(sheet.level)
        .bind(&sheet.background)
        .bind(&sheet.alignment)
        .bind(sheet.abilities.strength)
        .bind(sheet.abilities.dexterity)
        .bind(sheet.abilities.constitution)
        .bind(sheet.abilities.intelligence)
        .bind(sheet.abilities.wisdom)
        .bind(sheet.abilities.charisma)
        .bind(sheet.armor_class)
        .bind(sheet.hit_points)
        .bind(sheet.max_hit_points)
        .bind(sheet.speed)
        .bind(sheet.proficiency_bonus)
        .bind(json_or_null(&sheet.skills))
        .bind(json_or_null(&sheet.saving_throws))
        .bind(json_or_null(&sheet.equipment))
        .bind(json_or_null(&sheet.spells))
        .bind(sheet.created_at)
        .bind(sheet.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || room_not_found(sheet.room_id)))?;

        Ok(())
    }

    #[instrument(skip(self, sheet), fields(character_id = %sheet.id))]
    async fn update(&self, sheet: &CharacterSheet) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE character_sheets
            SET name = $2, race = $3, class = $4, level = $5, background = $6, alignment = $7,
                strength = $8, dexterity = $9, constitution = $10, intelligence = $11,
                wisdom = $12, charisma = $13, armor_class = $14, hit_points = $15,
                max_hit_points = $16, speed = $17, proficiency_bonus = $18,
                skills = $19, saving_throws = $20, equipment = $21, spells = $22,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(sheet.id.into_inner())
        .bind(&sheet.name)
        .bind(&sheet.race)
        .bind(&sheet.class)
        .bind(sheet.level)
        .bind(&sheet.background)
        .bind(&sheet.alignment)
        .bind(sheet.abilities.strength)
        .bind(sheet.abilities.dexterity)
        .bind(sheet.abilities.constitution)
        .bind(sheet.abilities.intelligence)
        .bind(sheet.abilities.wisdom)
        .bind(sheet.abilities.charisma)
        .bind(sheet.armor_class)
        .bind(sheet.hit_points)
        .bind(sheet.max_hit_points)
        .bind(sheet.speed)
        .bind(sheet.proficiency_bonus)
        .bind(json_or_null(&sheet.skills))
        .bind(json_or_null(&sheet.saving_throws))
        .bind(json_or_null(&sheet.equipment))
        .bind(json_or_null(&sheet.spells))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(character_not_found(sheet.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM character_sheets WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(character_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCharacterRepository>();
    }

    #[test]
    fn test_select_columns_cover_model() {
        for column in ["class", "proficiency_bonus", "saving_throws", "updated_at"] {
            assert!(SELECT_COLUMNS.contains(column));
        }
    }
}
