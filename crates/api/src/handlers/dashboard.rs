//! Handler for `GET /dashboard`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::records::{GoalRecord, TaskRecord};
use habitsgoals_core::stats::DashboardStats;
use habitsgoals_db::models::goal::GoalView;
use habitsgoals_db::models::task::Task;
use habitsgoals_db::repositories::{GoalRepo, HabitLogRepo, HabitRepo, TaskRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::habits::{due_today, TodayHabit};
use crate::middleware::auth::AuthUser;
use crate::middleware::locale::RequestLocale;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of goals shown in the "upcoming deadlines" card.
const UPCOMING_GOALS: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub today_habits: Vec<TodayHabit>,
    /// Open goals with a deadline, soonest first.
    pub upcoming_goals: Vec<GoalView>,
    /// Open tasks due today or earlier.
    pub due_tasks: Vec<Task>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
    RequestLocale(language): RequestLocale,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let habits = HabitRepo::list(&state.pool, auth.user_id).await?;
    let logs = HabitLogRepo::list_all_for_user(&state.pool, auth.user_id).await?;
    let goals = GoalRepo::list(&state.pool, auth.user_id).await?;
    let tasks = TaskRepo::list(&state.pool, auth.user_id).await?;

    let stats = DashboardStats::compute(&habits, &logs, &goals, today);

    let mut upcoming: Vec<_> = goals
        .into_iter()
        .filter(|g| g.deadline.is_some() && !g.is_archived && !g.is_completed())
        .collect();
    upcoming.sort_by_key(|g| g.deadline);
    let upcoming_goals = upcoming
        .into_iter()
        .take(UPCOMING_GOALS)
        .map(|g| GoalView::new(g, today))
        .collect();

    let due_tasks = tasks
        .into_iter()
        .filter(|t| t.is_due_today(today) || t.is_overdue(today))
        .filter(|t| !t.status.is_done())
        .collect();

    Ok(Json(DataResponse {
        data: Dashboard {
            stats,
            today_habits: due_today(habits, &logs, today, |f| f.describe(language)),
            upcoming_goals,
            due_tasks,
        },
    }))
}
