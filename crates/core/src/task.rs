//! Task status and priority.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    /// Quick-toggle target: a done task reopens as `todo`, anything else
    /// is marked `done`.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Done => TaskStatus::Todo,
            TaskStatus::Todo | TaskStatus::Doing => TaskStatus::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(CoreError::validation(format!(
                "Invalid task status '{other}'. Must be one of: todo, doing, done"
            ))),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(CoreError::validation(format!(
                "Invalid priority '{other}'. Must be one of: low, medium, high"
            ))),
        }
    }
}

impl TryFrom<String> for TaskPriority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Label/colour pairs shown by the priority and status pickers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChoiceInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub const PRIORITIES: [ChoiceInfo; 3] = [
    ChoiceInfo { value: "low", label: "Baixa", color: "green" },
    ChoiceInfo { value: "medium", label: "Média", color: "yellow" },
    ChoiceInfo { value: "high", label: "Alta", color: "red" },
];

pub const TASK_STATUSES: [ChoiceInfo; 3] = [
    ChoiceInfo { value: "todo", label: "A Fazer", color: "gray" },
    ChoiceInfo { value: "doing", label: "Fazendo", color: "blue" },
    ChoiceInfo { value: "done", label: "Concluído", color: "green" },
];
