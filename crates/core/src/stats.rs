//! Aggregate counters, streaks and the completion heatmap.
//!
//! Everything here is recomputed from the full collections on each call;
//! nothing is cached or stored.

use std::collections::{BTreeSet, HashMap};

use chrono::Duration;
use serde::Serialize;

use crate::dates::{date_range, weekday_index};
use crate::progress::habit_done;
use crate::records::{GoalRecord, HabitLogRecord, HabitRecord, TaskRecord};
use crate::task::TaskStatus;
use crate::types::{Day, DbId};

/// Longest range a report may cover.
pub const MAX_REPORT_DAYS: i64 = 366;

/// Range used when a report request names no bounds.
pub const DEFAULT_REPORT_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// The log of each `(habit, day)` pair, keeping the newest when several
/// were recorded.
pub fn latest_logs<L: HabitLogRecord>(logs: &[L]) -> HashMap<(DbId, Day), &L> {
    let mut latest: HashMap<(DbId, Day), &L> = HashMap::new();
    for log in logs {
        latest
            .entry((log.habit_id(), log.day()))
            .and_modify(|current| {
                if log.created_at() > current.created_at() {
                    *current = log;
                }
            })
            .or_insert(log);
    }
    latest
}

/// The log of one habit on one day.
pub fn log_for_day<L: HabitLogRecord>(logs: &[L], habit_id: DbId, day: Day) -> Option<&L> {
    logs.iter()
        .filter(|l| l.habit_id() == habit_id && l.day() == day)
        .max_by_key(|l| l.created_at())
}

fn is_done<H: HabitRecord, L: HabitLogRecord>(habit: &H, log: Option<&L>) -> bool {
    log.is_some_and(|l| habit_done(habit.target(), l.completed(), l.value()))
}

/// Days on which `habit` was done.
pub fn habit_completed_days<H: HabitRecord, L: HabitLogRecord>(habit: &H, logs: &[L]) -> BTreeSet<Day> {
    latest_logs(logs)
        .into_iter()
        .filter(|((habit_id, _), log)| *habit_id == habit.habit_id() && is_done(habit, Some(*log)))
        .map(|((_, day), _)| day)
        .collect()
}

/// Days on which at least one habit was done.
pub fn completed_days<H: HabitRecord, L: HabitLogRecord>(habits: &[H], logs: &[L]) -> BTreeSet<Day> {
    let by_id: HashMap<DbId, &H> = habits.iter().map(|h| (h.habit_id(), h)).collect();
    latest_logs(logs)
        .into_iter()
        .filter_map(|((habit_id, day), log)| {
            let habit = by_id.get(&habit_id)?;
            is_done(*habit, Some(log)).then_some(day)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// Consecutive completed days ending today, or ending yesterday when today
/// is not completed yet.
pub fn current_streak(days: &BTreeSet<Day>, today: Day) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive completed days.
pub fn best_streak(days: &BTreeSet<Day>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<Day> = None;
    for &day in days {
        run = match previous {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }
    best
}

// ---------------------------------------------------------------------------
// List stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HabitStats {
    pub total: usize,
    pub active: usize,
    pub completed_today: usize,
}

impl HabitStats {
    pub fn compute<H: HabitRecord, L: HabitLogRecord>(habits: &[H], logs: &[L], today: Day) -> Self {
        let completed_today = habits
            .iter()
            .filter(|h| !h.is_archived() && is_done(*h, log_for_day(logs, h.habit_id(), today)))
            .count();
        Self {
            total: habits.len(),
            active: habits.iter().filter(|h| !h.is_archived()).count(),
            completed_today,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GoalStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl GoalStats {
    pub fn compute<G: GoalRecord>(goals: &[G], today: Day) -> Self {
        let live = || goals.iter().filter(|g| !g.is_archived());
        Self {
            total: goals.len(),
            active: live().filter(|g| g.is_active(today)).count(),
            completed: live().filter(|g| g.is_completed()).count(),
            overdue: live().filter(|g| g.is_overdue(today)).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    pub overdue: usize,
    pub today: usize,
}

impl TaskStats {
    pub fn compute<T: TaskRecord>(tasks: &[T], today: Day) -> Self {
        let with_status = |s: TaskStatus| tasks.iter().filter(|t| t.status() == s).count();
        Self {
            total: tasks.len(),
            todo: with_status(TaskStatus::Todo),
            doing: with_status(TaskStatus::Doing),
            done: with_status(TaskStatus::Done),
            overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
            today: tasks
                .iter()
                .filter(|t| t.is_due_today(today) && !t.status().is_done())
                .count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: Day,
    pub completed: usize,
    pub total: usize,
    /// Intensity bucket, 0 through 4.
    pub level: u8,
}

pub fn heatmap_level(completed: usize, total: usize) -> u8 {
    if total == 0 || completed == 0 {
        return 0;
    }
    let rate = completed as f64 / total as f64;
    if rate < 0.25 {
        1
    } else if rate < 0.5 {
        2
    } else if rate < 0.75 {
        3
    } else {
        4
    }
}

/// One cell per day in `from..=to`: habits due that day against habits done.
pub fn heatmap<H: HabitRecord, L: HabitLogRecord>(habits: &[H], logs: &[L], from: Day, to: Day) -> Vec<HeatmapCell> {
    let latest = latest_logs(logs);
    date_range(from, to)
        .map(|day| {
            let due: Vec<&H> = habits.iter().filter(|h| h.is_due_on(day)).collect();
            let completed = due
                .iter()
                .filter(|h| is_done(**h, latest.get(&(h.habit_id(), day)).copied()))
                .count();
            HeatmapCell {
                date: day,
                completed,
                total: due.len(),
                level: heatmap_level(completed, due.len()),
            }
        })
        .collect()
}

/// Rounded percentage; 0 when there is nothing to complete.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Dashboard and reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub habits_today: usize,
    pub habits_completed: usize,
    pub active_goals: usize,
    pub current_streak: u32,
    pub completion_rate: u32,
}

impl DashboardStats {
    pub fn compute<H, L, G>(habits: &[H], logs: &[L], goals: &[G], today: Day) -> Self
    where
        H: HabitRecord,
        L: HabitLogRecord,
        G: GoalRecord,
    {
        let due: Vec<&H> = habits.iter().filter(|h| h.is_due_on(today)).collect();
        let habits_completed = due
            .iter()
            .filter(|h| is_done(**h, log_for_day(logs, h.habit_id(), today)))
            .count();
        Self {
            habits_today: due.len(),
            habits_completed,
            active_goals: goals
                .iter()
                .filter(|g| !g.is_archived() && !g.is_completed())
                .count(),
            current_streak: current_streak(&completed_days(habits, logs), today),
            completion_rate: completion_rate(habits_completed, due.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOverview {
    pub from: Day,
    pub to: Day,
    pub total_habits: usize,
    pub active_habits: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed habit slots over due habit slots in the range.
    pub completion_rate: u32,
    /// Completion rate over the last seven days of the range.
    pub weekly_average: u32,
    /// Weekday (0 = Sunday) with the highest completion rate, if any habit
    /// was due in the range.
    pub best_weekday: Option<u8>,
}

/// Inputs to [`ReportOverview::compute`].
pub struct ReportInput<'a, H, L, G, T> {
    pub habits: &'a [H],
    pub logs: &'a [L],
    pub goals: &'a [G],
    pub tasks: &'a [T],
    pub from: Day,
    pub to: Day,
    pub today: Day,
}

impl ReportOverview {
    /// Returns the overview together with the heatmap cells it was built
    /// from.
    pub fn compute<H, L, G, T>(input: ReportInput<'_, H, L, G, T>) -> (Self, Vec<HeatmapCell>)
    where
        H: HabitRecord,
        L: HabitLogRecord,
        G: GoalRecord,
        T: TaskRecord,
    {
        let cells = heatmap(input.habits, input.logs, input.from, input.to);
        let sum = |cells: &[HeatmapCell]| {
            cells
                .iter()
                .fold((0, 0), |(c, t), cell| (c + cell.completed, t + cell.total))
        };

        let (completed, total) = sum(&cells);
        let week_start = cells.len().saturating_sub(7);
        let (week_completed, week_total) = sum(&cells[week_start..]);

        let mut by_weekday = [(0usize, 0usize); 7];
        for cell in &cells {
            let slot = &mut by_weekday[weekday_index(cell.date) as usize];
            slot.0 += cell.completed;
            slot.1 += cell.total;
        }
        let mut best_weekday: Option<(u8, f64)> = None;
        for (index, (c, t)) in by_weekday.iter().enumerate() {
            if *t == 0 {
                continue;
            }
            let rate = *c as f64 / *t as f64;
            if best_weekday.is_none_or(|(_, best)| rate > best) {
                best_weekday = Some((index as u8, rate));
            }
        }

        let days = completed_days(input.habits, input.logs);
        let overview = Self {
            from: input.from,
            to: input.to,
            total_habits: input.habits.len(),
            active_habits: input.habits.iter().filter(|h| !h.is_archived()).count(),
            current_streak: current_streak(&days, input.today),
            longest_streak: best_streak(&days),
            total_goals: input.goals.len(),
            completed_goals: input.goals.iter().filter(|g| g.is_completed()).count(),
            total_tasks: input.tasks.len(),
            completed_tasks: input.tasks.iter().filter(|t| t.status().is_done()).count(),
            completion_rate: completion_rate(completed, total),
            weekly_average: completion_rate(week_completed, week_total),
            best_weekday: best_weekday.map(|(index, _)| index),
        };
        (overview, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_day;
    use crate::frequency::Frequency;
    use crate::records::Searchable;
    use crate::task::TaskPriority;
    use crate::types::Timestamp;
    use chrono::TimeZone;

    fn day(s: &str) -> Day {
        parse_day(s).unwrap()
    }

    fn days(list: &[&str]) -> BTreeSet<Day> {
        list.iter().map(|d| day(d)).collect()
    }

    struct H {
        id: DbId,
        target: Option<f64>,
        archived: bool,
        frequency: Frequency,
    }

    impl Searchable for H {
        fn title(&self) -> &str {
            "habit"
        }
        fn description(&self) -> Option<&str> {
            None
        }
    }

    impl HabitRecord for H {
        fn habit_id(&self) -> DbId {
            self.id
        }
        fn frequency(&self) -> &Frequency {
            &self.frequency
        }
        fn target(&self) -> Option<f64> {
            self.target
        }
        fn is_archived(&self) -> bool {
            self.archived
        }
        fn created_on(&self) -> Day {
            day("2024-01-01")
        }
    }

    fn habit(id: DbId) -> H {
        H {
            id,
            target: None,
            archived: false,
            frequency: Frequency::default(),
        }
    }

    struct L {
        habit_id: DbId,
        day: Day,
        completed: bool,
        value: Option<f64>,
        created_at: Timestamp,
    }

    impl HabitLogRecord for L {
        fn habit_id(&self) -> DbId {
            self.habit_id
        }
        fn day(&self) -> Day {
            self.day
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

    fn log(habit_id: DbId, d: &str, completed: bool, minute: u32) -> L {
        L {
            habit_id,
            day: day(d),
            completed,
            value: None,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn current_streak_ending_today() {
        let d = days(&["2024-05-13", "2024-05-14", "2024-05-15"]);
        assert_eq!(current_streak(&d, day("2024-05-15")), 3);
    }

    #[test]
    fn current_streak_counts_from_yesterday_when_today_is_open() {
        let d = days(&["2024-05-12", "2024-05-13", "2024-05-14"]);
        assert_eq!(current_streak(&d, day("2024-05-15")), 3);
    }

    #[test]
    fn current_streak_is_zero_after_a_gap() {
        let d = days(&["2024-05-12", "2024-05-13"]);
        assert_eq!(current_streak(&d, day("2024-05-15")), 0);
    }

    #[test]
    fn best_streak_finds_longest_run() {
        let d = days(&[
            "2024-04-01", "2024-04-02", "2024-04-05", "2024-04-06", "2024-04-07", "2024-04-09",
        ]);
        assert_eq!(best_streak(&d), 3);
        assert_eq!(best_streak(&BTreeSet::new()), 0);
    }

    #[test]
    fn heatmap_levels() {
        assert_eq!(heatmap_level(0, 0), 0);
        assert_eq!(heatmap_level(0, 4), 0);
        assert_eq!(heatmap_level(1, 5), 1);
        assert_eq!(heatmap_level(1, 4), 2);
        assert_eq!(heatmap_level(2, 4), 3);
        assert_eq!(heatmap_level(3, 4), 4);
        assert_eq!(heatmap_level(4, 4), 4);
    }

    #[test]
    fn newest_log_of_the_day_wins() {
        let logs = vec![
            log(1, "2024-05-15", true, 0),
            log(1, "2024-05-15", false, 30),
        ];
        let chosen = log_for_day(&logs, 1, day("2024-05-15")).unwrap();
        assert!(!chosen.completed);
        let habits = vec![habit(1)];
        let stats = HabitStats::compute(&habits, &logs, day("2024-05-15"));
        assert_eq!(stats.completed_today, 0);
    }

    #[test]
    fn quantitative_habit_done_when_target_reached() {
        let today = day("2024-05-15");
        let mut water = habit(1);
        water.target = Some(2000.0);
        let habits = vec![water];

        let mut partial = log(1, "2024-05-15", false, 0);
        partial.value = Some(500.0);
        assert_eq!(HabitStats::compute(&habits, &[partial], today).completed_today, 0);

        let mut full = log(1, "2024-05-15", false, 0);
        full.value = Some(2000.0);
        assert_eq!(HabitStats::compute(&habits, &[full], today).completed_today, 1);
    }

    #[test]
    fn dashboard_counts_due_habits_only() {
        let mut weekly = habit(2);
        // 2024-05-15 is a Wednesday.
        weekly.frequency = Frequency::Weekly { days: vec![1] };
        let mut archived = habit(3);
        archived.archived = true;
        let habits = vec![habit(1), weekly, archived];
        let logs = vec![
            log(1, "2024-05-15", true, 0),
            log(1, "2024-05-14", true, 0),
        ];
        let goals: Vec<G> = vec![G(10.0, Some(100.0), false), G(100.0, Some(100.0), false), G(1.0, Some(5.0), true)];

        let stats = DashboardStats::compute(&habits, &logs, &goals, day("2024-05-15"));
        assert_eq!(stats.habits_today, 1);
        assert_eq!(stats.habits_completed, 1);
        assert_eq!(stats.completion_rate, 100);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.active_goals, 1);
    }

    struct G(f64, Option<f64>, bool);

    impl Searchable for G {
        fn title(&self) -> &str {
            "goal"
        }
        fn description(&self) -> Option<&str> {
            None
        }
    }

    impl GoalRecord for G {
        fn progress_value(&self) -> f64 {
            self.0
        }
        fn target_value(&self) -> Option<f64> {
            self.1
        }
        fn deadline(&self) -> Option<Day> {
            None
        }
        fn is_archived(&self) -> bool {
            self.2
        }
    }

    struct T(TaskStatus, Option<Day>);

    impl Searchable for T {
        fn title(&self) -> &str {
            "task"
        }
        fn description(&self) -> Option<&str> {
            None
        }
    }

    impl TaskRecord for T {
        fn status(&self) -> TaskStatus {
            self.0
        }
        fn priority(&self) -> TaskPriority {
            TaskPriority::Medium
        }
        fn due_date(&self) -> Option<Day> {
            self.1
        }
    }

    #[test]
    fn task_stats() {
        let today = day("2024-05-15");
        let tasks = vec![
            T(TaskStatus::Todo, Some(day("2024-05-10"))),
            T(TaskStatus::Done, Some(day("2024-05-10"))),
            T(TaskStatus::Doing, Some(today)),
            T(TaskStatus::Done, Some(today)),
            T(TaskStatus::Todo, None),
        ];
        let stats = TaskStats::compute(&tasks, today);
        assert_eq!(
            stats,
            TaskStats { total: 5, todo: 2, doing: 1, done: 2, overdue: 1, today: 1 }
        );
    }

    #[test]
    fn report_overview_over_a_week() {
        let habits = vec![habit(1), habit(2)];
        // Habit 1 every day, habit 2 only on Monday 2024-05-13.
        let mut logs: Vec<L> = date_range(day("2024-05-09"), day("2024-05-15"))
            .map(|d| log(1, &d.to_string(), true, 0))
            .collect();
        logs.push(log(2, "2024-05-13", true, 0));
        let goals = vec![G(5.0, Some(5.0), false), G(1.0, Some(5.0), false)];
        let tasks = vec![T(TaskStatus::Done, None), T(TaskStatus::Todo, None)];

        let (overview, cells) = ReportOverview::compute(ReportInput {
            habits: &habits,
            logs: &logs,
            goals: &goals,
            tasks: &tasks,
            from: day("2024-05-09"),
            to: day("2024-05-15"),
            today: day("2024-05-15"),
        });

        assert_eq!(cells.len(), 7);
        assert_eq!(overview.completion_rate, 57); // 8 of 14 slots
        assert_eq!(overview.weekly_average, 57);
        assert_eq!(overview.best_weekday, Some(1));
        assert_eq!(overview.current_streak, 7);
        assert_eq!(overview.longest_streak, 7);
        assert_eq!(overview.completed_goals, 1);
        assert_eq!(overview.completed_tasks, 1);
    }
}
