//! Repository for the `goals` table.

use habitsgoals_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::goal::{CreateGoal, Goal, UpdateGoal};

const COLUMNS: &str = "id, user_id, title, description, color, icon, deadline, unit, \
                        target_value, progress_value, milestones, linked_habits, is_archived, \
                        created_at, updated_at";

pub struct GoalRepo;

impl GoalRepo {
    pub async fn create(pool: &PgPool, user_id: DbId, input: &CreateGoal) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO goals
                (user_id, title, description, color, icon, deadline, unit, target_value,
                 progress_value, milestones, linked_habits)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.deadline)
            .bind(&input.unit)
            .bind(input.target_value)
            .bind(input.progress_value)
            .bind(Json(&input.milestones))
            .bind(&input.linked_habits)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, user_id: DbId, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All goals of the user, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Goal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goals WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateGoal,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!(
            "UPDATE goals SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                color = COALESCE($5, color),
                icon = COALESCE($6, icon),
                deadline = COALESCE($7, deadline),
                unit = COALESCE($8, unit),
                target_value = COALESCE($9, target_value),
                progress_value = COALESCE($10, progress_value),
                milestones = COALESCE($11, milestones),
                linked_habits = COALESCE($12, linked_habits),
                is_archived = COALESCE($13, is_archived)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.deadline)
            .bind(&input.unit)
            .bind(input.target_value)
            .bind(input.progress_value)
            .bind(input.milestones.as_ref().map(Json))
            .bind(&input.linked_habits)
            .bind(input.is_archived)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
