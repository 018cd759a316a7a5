//! Goals and their milestones.

use habitsgoals_core::records::{GoalRecord, Searchable};
use habitsgoals_core::types::{Day, DbId, Timestamp};
use habitsgoals_core::validation::Milestone;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<Day>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    pub progress_value: f64,
    pub milestones: Json<Vec<Milestone>>,
    pub linked_habits: Vec<DbId>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Goal {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl GoalRecord for Goal {
    fn progress_value(&self) -> f64 {
        self.progress_value
    }

    fn target_value(&self) -> Option<f64> {
        self.target_value
    }

    fn deadline(&self) -> Option<Day> {
        self.deadline
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

/// Goal row plus the values derived from it for a given day.
#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percentage: f64,
    pub is_completed: bool,
    pub is_overdue: bool,
    pub days_until_deadline: Option<i64>,
}

impl GoalView {
    pub fn new(goal: Goal, today: Day) -> Self {
        Self {
            progress_percentage: goal.progress_percentage(),
            is_completed: goal.is_completed(),
            is_overdue: goal.is_overdue(today),
            days_until_deadline: goal.days_until_deadline(today),
            goal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<Day>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    pub progress_value: f64,
    pub milestones: Vec<Milestone>,
    pub linked_habits: Vec<DbId>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGoal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<Day>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    pub progress_value: Option<f64>,
    pub milestones: Option<Vec<Milestone>>,
    pub linked_habits: Option<Vec<DbId>>,
    pub is_archived: Option<bool>,
}
