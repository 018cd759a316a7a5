//! Repository for the `habits` table.

use habitsgoals_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::habit::{CreateHabit, Habit, UpdateHabit};

const COLUMNS: &str = "id, user_id, title, description, color, icon, frequency, unit, target, \
                        timezone, remind_at, is_archived, created_at, updated_at";

pub struct HabitRepo;

impl HabitRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHabit,
    ) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "INSERT INTO habits
                (user_id, title, description, color, icon, frequency, unit, target, timezone, remind_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(Json(&input.frequency))
            .bind(&input.unit)
            .bind(input.target)
            .bind(&input.timezone)
            .bind(&input.remind_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All habits of the user, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Habit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateHabit,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                color = COALESCE($5, color),
                icon = COALESCE($6, icon),
                frequency = COALESCE($7, frequency),
                unit = COALESCE($8, unit),
                target = COALESCE($9, target),
                timezone = COALESCE($10, timezone),
                remind_at = COALESCE($11, remind_at),
                is_archived = COALESCE($12, is_archived)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.frequency.as_ref().map(Json))
            .bind(&input.unit)
            .bind(input.target)
            .bind(&input.timezone)
            .bind(&input.remind_at)
            .bind(input.is_archived)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_archived(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        archived: bool,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET is_archived = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .bind(archived)
            .fetch_optional(pool)
            .await
    }

    /// Logs are removed by cascade.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
