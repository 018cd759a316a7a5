//! List filters.
//!
//! Every filter is a conjunction of a free-text search and categorical
//! predicates, applied to the whole collection. Collections are small (tens
//! to hundreds of rows), so there is no index and no pagination.

use serde::Deserialize;

use crate::records::{GoalRecord, HabitRecord, Searchable, TaskRecord};
use crate::task::{TaskPriority, TaskStatus};
use crate::types::Day;

/// Case-insensitive substring match on title or description.
/// An empty or blank term matches everything.
pub fn matches_search<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    item.title().to_lowercase().contains(&term)
        || item
            .description()
            .is_some_and(|d| d.to_lowercase().contains(&term))
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatusFilter {
    #[default]
    All,
    Active,
    Archived,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: HabitStatusFilter,
}

impl HabitFilter {
    pub fn matches<T: HabitRecord>(&self, habit: &T) -> bool {
        let status_ok = match self.status {
            HabitStatusFilter::All => true,
            HabitStatusFilter::Active => !habit.is_archived(),
            HabitStatusFilter::Archived => habit.is_archived(),
        };
        status_ok && matches_search(habit, &self.search)
    }

    pub fn apply<T: HabitRecord>(&self, habits: Vec<T>) -> Vec<T> {
        habits.into_iter().filter(|h| self.matches(h)).collect()
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatusFilter {
    #[default]
    All,
    Active,
    Completed,
    Overdue,
    Archived,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: GoalStatusFilter,
}

impl GoalFilter {
    /// `all` keeps archived goals; the progress-based statuses only look at
    /// goals that are not archived.
    pub fn matches<T: GoalRecord>(&self, goal: &T, today: Day) -> bool {
        let status_ok = match self.status {
            GoalStatusFilter::All => true,
            GoalStatusFilter::Archived => goal.is_archived(),
            GoalStatusFilter::Active => goal.is_active(today),
            GoalStatusFilter::Completed => !goal.is_archived() && goal.is_completed(),
            GoalStatusFilter::Overdue => !goal.is_archived() && goal.is_overdue(today),
        };
        status_ok && matches_search(goal, &self.search)
    }

    pub fn apply<T: GoalRecord>(&self, goals: Vec<T>, today: Day) -> Vec<T> {
        goals.into_iter().filter(|g| self.matches(g, today)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskView {
    #[default]
    All,
    /// Due today, or currently in progress.
    Today,
    /// Due strictly after today.
    Upcoming,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub search: String,
    /// `None` means every priority.
    #[serde(default, deserialize_with = "all_or::<_, TaskPriority>")]
    pub priority: Option<TaskPriority>,
    /// `None` means every status.
    #[serde(default, deserialize_with = "all_or::<_, TaskStatus>")]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub view: TaskView,
}

impl TaskFilter {
    pub fn matches<T: TaskRecord>(&self, task: &T, today: Day) -> bool {
        let priority_ok = self.priority.is_none_or(|p| task.priority() == p);
        let status_ok = self.status.is_none_or(|s| task.status() == s);
        let view_ok = match self.view {
            TaskView::All => true,
            TaskView::Today => task.is_due_today(today) || task.status() == TaskStatus::Doing,
            TaskView::Upcoming => task.due_date().is_some_and(|d| d > today),
        };
        priority_ok && status_ok && view_ok && matches_search(task, &self.search)
    }

    pub fn apply<T: TaskRecord>(&self, tasks: Vec<T>, today: Day) -> Vec<T> {
        tasks.into_iter().filter(|t| self.matches(t, today)).collect()
    }
}

/// Accept either the literal `"all"` (mapped to `None`) or a variant name.
fn all_or<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_day;
    use crate::frequency::Frequency;
    use crate::records::{GoalRecord, HabitRecord, Searchable, TaskRecord};
    use crate::types::DbId;

    #[derive(Debug, Clone, PartialEq)]
    struct T {
        title: String,
        description: Option<String>,
        status: TaskStatus,
        priority: TaskPriority,
        due: Option<Day>,
    }

    impl Searchable for T {
        fn title(&self) -> &str {
            &self.title
        }
        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
    }

    impl TaskRecord for T {
        fn status(&self) -> TaskStatus {
            self.status
        }
        fn priority(&self) -> TaskPriority {
            self.priority
        }
        fn due_date(&self) -> Option<Day> {
            self.due
        }
    }

    fn task(title: &str, status: TaskStatus, priority: TaskPriority, due: Option<&str>) -> T {
        T {
            title: title.to_string(),
            description: None,
            status,
            priority,
            due: due.map(|d| parse_day(d).unwrap()),
        }
    }

    fn today() -> Day {
        parse_day("2024-05-15").unwrap()
    }

    fn sample_tasks() -> Vec<T> {
        vec![
            task("Pay rent", TaskStatus::Done, TaskPriority::High, Some("2024-05-01")),
            task("Write report", TaskStatus::Doing, TaskPriority::Medium, None),
            task("Call mom", TaskStatus::Todo, TaskPriority::Low, Some("2024-05-15")),
            task("Book flights", TaskStatus::Todo, TaskPriority::High, Some("2024-06-01")),
            task("Renew passport", TaskStatus::Done, TaskPriority::Medium, Some("2024-05-20")),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut t = task("Read Book", TaskStatus::Todo, TaskPriority::Low, None);
        t.description = Some("Chapter on Ownership".into());
        assert!(matches_search(&t, "book"));
        assert!(matches_search(&t, "OWNERSHIP"));
        assert!(matches_search(&t, "  "));
        assert!(!matches_search(&t, "borrow"));
    }

    #[test]
    fn status_done_returns_exactly_the_done_subset() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let all = sample_tasks();
        let expected: Vec<T> = all.iter().filter(|t| t.status == TaskStatus::Done).cloned().collect();

        let once = filter.apply(all, today());
        assert_eq!(once, expected);

        let twice = filter.apply(once.clone(), today());
        assert_eq!(twice, once);
    }

    #[test]
    fn today_view_includes_due_today_and_in_progress() {
        let filter = TaskFilter {
            view: TaskView::Today,
            ..Default::default()
        };
        let titles: Vec<_> = filter
            .apply(sample_tasks(), today())
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Write report", "Call mom"]);
    }

    #[test]
    fn upcoming_view_is_strictly_after_today() {
        let filter = TaskFilter {
            view: TaskView::Upcoming,
            ..Default::default()
        };
        let titles: Vec<_> = filter
            .apply(sample_tasks(), today())
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Book flights", "Renew passport"]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let filter = TaskFilter {
            search: "b".into(),
            priority: Some(TaskPriority::High),
            status: Some(TaskStatus::Todo),
            view: TaskView::All,
        };
        let out = filter.apply(sample_tasks(), today());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Book flights");
    }

    #[test]
    fn all_keyword_deserializes_to_none() {
        let f: TaskFilter =
            serde_json::from_value(serde_json::json!({"priority": "all", "status": "done"})).unwrap();
        assert_eq!(f.priority, None);
        assert_eq!(f.status, Some(TaskStatus::Done));
        assert!(serde_json::from_value::<TaskFilter>(serde_json::json!({"status": "blocked"})).is_err());
    }

    // --- goals ---

    #[derive(Debug, Clone, PartialEq)]
    struct G {
        title: String,
        progress: f64,
        target: Option<f64>,
        deadline: Option<Day>,
        archived: bool,
    }

    impl Searchable for G {
        fn title(&self) -> &str {
            &self.title
        }
        fn description(&self) -> Option<&str> {
            None
        }
    }

    impl GoalRecord for G {
        fn progress_value(&self) -> f64 {
            self.progress
        }
        fn target_value(&self) -> Option<f64> {
            self.target
        }
        fn deadline(&self) -> Option<Day> {
            self.deadline
        }
        fn is_archived(&self) -> bool {
            self.archived
        }
    }

    fn goal(title: &str, progress: f64, target: Option<f64>, deadline: Option<&str>, archived: bool) -> G {
        G {
            title: title.into(),
            progress,
            target,
            deadline: deadline.map(|d| parse_day(d).unwrap()),
            archived,
        }
    }

    fn sample_goals() -> Vec<G> {
        vec![
            goal("Run 100km", 100.0, Some(100.0), None, false),
            goal("Read 12 books", 3.0, Some(12.0), Some("2024-01-01"), false),
            goal("Save money", 10.0, Some(100.0), Some("2024-12-31"), false),
            goal("Old goal", 1.0, Some(10.0), None, true),
        ]
    }

    fn goal_titles(status: GoalStatusFilter) -> Vec<String> {
        let filter = GoalFilter {
            search: String::new(),
            status,
        };
        filter
            .apply(sample_goals(), today())
            .into_iter()
            .map(|g| g.title)
            .collect()
    }

    #[test]
    fn goal_status_filters() {
        assert_eq!(goal_titles(GoalStatusFilter::All).len(), 4);
        assert_eq!(goal_titles(GoalStatusFilter::Completed), vec!["Run 100km"]);
        assert_eq!(goal_titles(GoalStatusFilter::Overdue), vec!["Read 12 books"]);
        assert_eq!(goal_titles(GoalStatusFilter::Active), vec!["Save money"]);
        assert_eq!(goal_titles(GoalStatusFilter::Archived), vec!["Old goal"]);
    }

    // --- habits ---

    #[derive(Debug, Clone, PartialEq)]
    struct H {
        title: String,
        archived: bool,
        frequency: Frequency,
    }

    impl Searchable for H {
        fn title(&self) -> &str {
            &self.title
        }
        fn description(&self) -> Option<&str> {
            None
        }
    }

    impl HabitRecord for H {
        fn habit_id(&self) -> DbId {
            0
        }
        fn frequency(&self) -> &Frequency {
            &self.frequency
        }
        fn target(&self) -> Option<f64> {
            None
        }
        fn is_archived(&self) -> bool {
            self.archived
        }
        fn created_on(&self) -> Day {
            parse_day("2024-01-01").unwrap()
        }
    }

    #[test]
    fn habit_archive_filter() {
        let habits = vec![
            H { title: "Drink water".into(), archived: false, frequency: Frequency::default() },
            H { title: "Meditate".into(), archived: true, frequency: Frequency::default() },
        ];
        let active = HabitFilter { status: HabitStatusFilter::Active, ..Default::default() };
        let archived = HabitFilter { status: HabitStatusFilter::Archived, ..Default::default() };
        assert_eq!(active.apply(habits.clone())[0].title, "Drink water");
        assert_eq!(archived.apply(habits.clone())[0].title, "Meditate");
        assert_eq!(HabitFilter::default().apply(habits).len(), 2);
    }
}
