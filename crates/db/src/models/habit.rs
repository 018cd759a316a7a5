//! Habits.

use chrono_tz::Tz;
use habitsgoals_core::dates::resolve_timezone;
use habitsgoals_core::frequency::Frequency;
use habitsgoals_core::records::{HabitRecord, Searchable};
use habitsgoals_core::types::{Day, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Habit {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub frequency: Json<Frequency>,
    /// Unit code; quantitative habits always carry both `unit` and `target`.
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub timezone: Option<String>,
    pub remind_at: Vec<String>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Habit {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl HabitRecord for Habit {
    fn habit_id(&self) -> DbId {
        self.id
    }

    fn frequency(&self) -> &Frequency {
        &self.frequency.0
    }

    fn target(&self) -> Option<f64> {
        self.target
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }

    fn created_on(&self) -> Day {
        let tz = resolve_timezone(self.timezone.as_deref(), Tz::UTC);
        self.created_at.with_timezone(&tz).date_naive()
    }
}

/// Insert DTO, already validated and normalized.
#[derive(Debug, Clone)]
pub struct CreateHabit {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub frequency: Frequency,
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub timezone: Option<String>,
    pub remind_at: Vec<String>,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHabit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub frequency: Option<Frequency>,
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub timezone: Option<String>,
    pub remind_at: Option<Vec<String>>,
    pub is_archived: Option<bool>,
}
