//! Read-only views of the stored entities.
//!
//! The database rows live in `habitsgoals-db`; filters and stats here only
//! need a handful of fields, so they are written against these traits and
//! the row types implement them.

use crate::dates::{self, days_until};
use crate::frequency::Frequency;
use crate::progress::goal_progress;
use crate::task::{TaskPriority, TaskStatus};
use crate::types::{Day, DbId, Timestamp};

/// Anything with a title and an optional description.
pub trait Searchable {
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

pub trait HabitRecord: Searchable {
    fn habit_id(&self) -> DbId;
    fn frequency(&self) -> &Frequency;
    fn target(&self) -> Option<f64>;
    fn is_archived(&self) -> bool;
    /// Day the habit was created, in the owner's timezone.
    fn created_on(&self) -> Day;

    /// Due on `day`: scheduled by its frequency, not archived, and already
    /// existing on that day.
    fn is_due_on(&self, day: Day) -> bool {
        !self.is_archived() && self.created_on() <= day && self.frequency().is_due_on(day)
    }
}

pub trait HabitLogRecord {
    fn habit_id(&self) -> DbId;
    fn day(&self) -> Day;
    fn completed(&self) -> bool;
    fn value(&self) -> Option<f64>;
    /// Several logs may exist for one day; the newest one wins.
    fn created_at(&self) -> Timestamp;
}

pub trait GoalRecord: Searchable {
    fn progress_value(&self) -> f64;
    fn target_value(&self) -> Option<f64>;
    fn deadline(&self) -> Option<Day>;
    fn is_archived(&self) -> bool;

    fn progress_percentage(&self) -> f64 {
        goal_progress(self.progress_value(), self.target_value())
    }

    fn is_completed(&self) -> bool {
        self.progress_percentage() >= 100.0
    }

    /// Goals without a deadline are never overdue.
    fn is_overdue(&self, today: Day) -> bool {
        self.deadline().is_some_and(|d| dates::is_overdue(d, today))
    }

    fn days_until_deadline(&self, today: Day) -> Option<i64> {
        self.deadline().map(|d| days_until(d, today))
    }

    /// In progress: neither completed nor overdue, and not archived.
    fn is_active(&self, today: Day) -> bool {
        !self.is_archived() && !self.is_completed() && !self.is_overdue(today)
    }
}

pub trait TaskRecord: Searchable {
    fn status(&self) -> TaskStatus;
    fn priority(&self) -> TaskPriority;
    fn due_date(&self) -> Option<Day>;

    /// Overdue tasks are past their due date and still open.
    fn is_overdue(&self, today: Day) -> bool {
        !self.status().is_done() && self.due_date().is_some_and(|d| dates::is_overdue(d, today))
    }

    fn is_due_today(&self, today: Day) -> bool {
        self.due_date() == Some(today)
    }
}
