//! Repository for the `habit_logs` table.

use habitsgoals_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::models::habit_log::{CreateHabitLog, HabitLog};

const COLUMNS: &str = "id, habit_id, user_id, date, completed, value, created_at";

pub struct HabitLogRepo;

impl HabitLogRepo {
    /// Append a log. Earlier logs for the same day are kept; the newest one
    /// is the one that counts.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHabitLog,
    ) -> Result<HabitLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO habit_logs (habit_id, user_id, date, completed, value)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HabitLog>(&query)
            .bind(input.habit_id)
            .bind(user_id)
            .bind(input.date)
            .bind(input.completed)
            .bind(input.value)
            .fetch_one(pool)
            .await
    }

    /// Logs of one habit in `from..=to`, newest first.
    pub async fn list_for_habit(
        pool: &PgPool,
        user_id: DbId,
        habit_id: DbId,
        from: Day,
        to: Day,
    ) -> Result<Vec<HabitLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habit_logs
             WHERE user_id = $1 AND habit_id = $2 AND date BETWEEN $3 AND $4
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HabitLog>(&query)
            .bind(user_id)
            .bind(habit_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// All of the user's logs in `from..=to`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        from: Day,
        to: Day,
    ) -> Result<Vec<HabitLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habit_logs
             WHERE user_id = $1 AND date BETWEEN $2 AND $3
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HabitLog>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Every log of the user. Streaks need the full history.
    pub async fn list_all_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<HabitLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habit_logs WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HabitLog>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
