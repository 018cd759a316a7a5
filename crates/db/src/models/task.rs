//! One-off tasks.

use habitsgoals_core::records::{Searchable, TaskRecord};
use habitsgoals_core::task::{TaskPriority, TaskStatus};
use habitsgoals_core::types::{Day, DbId, Timestamp};
use habitsgoals_core::validation::ChecklistItem;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub due_date: Option<Day>,
    /// `HH:MM`.
    pub due_time: Option<String>,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub goal_id: Option<DbId>,
    pub project_id: Option<String>,
    pub reminders: Vec<String>,
    pub checklist: Json<Vec<ChecklistItem>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Task {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl TaskRecord for Task {
    fn status(&self) -> TaskStatus {
        self.status
    }

    fn priority(&self) -> TaskPriority {
        self.priority
    }

    fn due_date(&self) -> Option<Day> {
        self.due_date
    }
}

#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub due_date: Option<Day>,
    pub due_time: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub goal_id: Option<DbId>,
    pub project_id: Option<String>,
    pub reminders: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub due_date: Option<Day>,
    pub due_time: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub goal_id: Option<DbId>,
    pub project_id: Option<String>,
    pub reminders: Option<Vec<String>>,
    pub checklist: Option<Vec<ChecklistItem>>,
}
