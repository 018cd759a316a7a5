//! Loading a whole collection for one user.

use chrono::Duration;
use chrono_tz::Tz;
use habitsgoals_core::dates::{resolve_timezone, today_in};
use habitsgoals_core::types::{Day, DbId};
use habitsgoals_db::repositories::{GoalRepo, HabitLogRepo, HabitRepo, ProfileRepo, TaskRepo};
use habitsgoals_db::DbPool;
use habitsgoals_events::Collection;

/// How far back the `habit_logs` snapshot reaches, in days.
pub const HABIT_LOG_WINDOW_DAYS: i64 = 90;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// The user's profile timezone, or `fallback` when missing or unknown.
pub async fn user_timezone(pool: &DbPool, user_id: DbId, fallback: Tz) -> Result<Tz, sqlx::Error> {
    let profile = ProfileRepo::find(pool, user_id).await?;
    Ok(resolve_timezone(profile.as_ref().map(|p| p.timezone.as_str()), fallback))
}

/// The user's current day, in their profile timezone or `fallback`.
pub async fn user_today(pool: &DbPool, user_id: DbId, fallback: Tz) -> Result<Day, sqlx::Error> {
    Ok(today_in(user_timezone(pool, user_id, fallback).await?))
}

/// Every row of `collection` owned by `user_id`, newest first.
pub async fn load_snapshot(
    pool: &DbPool,
    user_id: DbId,
    collection: Collection,
    fallback_tz: Tz,
) -> Result<serde_json::Value, SnapshotError> {
    let value = match collection {
        Collection::Habits => serde_json::to_value(HabitRepo::list(pool, user_id).await?)?,
        Collection::Goals => serde_json::to_value(GoalRepo::list(pool, user_id).await?)?,
        Collection::Tasks => serde_json::to_value(TaskRepo::list(pool, user_id).await?)?,
        Collection::HabitLogs => {
            let today = user_today(pool, user_id, fallback_tz).await?;
            let from = today - Duration::days(HABIT_LOG_WINDOW_DAYS);
            serde_json::to_value(HabitLogRepo::list_for_user(pool, user_id, from, today).await?)?
        }
        Collection::Profile => serde_json::to_value(ProfileRepo::find(pool, user_id).await?)?,
    };
    Ok(value)
}
