//! Daily habit check-ins.

use habitsgoals_core::records::HabitLogRecord;
use habitsgoals_core::types::{Day, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HabitLog {
    pub id: DbId,
    pub habit_id: DbId,
    pub user_id: DbId,
    pub date: Day,
    pub completed: bool,
    pub value: Option<f64>,
    pub created_at: Timestamp,
}

impl HabitLogRecord for HabitLog {
    fn habit_id(&self) -> DbId {
        self.habit_id
    }

    fn day(&self) -> Day {
        self.date
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn value(&self) -> Option<f64> {
        self.value
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[derive(Debug, Clone)]
pub struct CreateHabitLog {
    pub habit_id: DbId,
    pub date: Day,
    pub completed: bool,
    pub value: Option<f64>,
}
