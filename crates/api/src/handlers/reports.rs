//! Handler for `GET /reports`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::stats::{HeatmapCell, ReportInput, ReportOverview};
use habitsgoals_db::repositories::{GoalRepo, HabitLogRepo, HabitRepo, TaskRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Report {
    pub overview: ReportOverview,
    pub heatmap: Vec<HeatmapCell>,
}

/// GET /api/v1/reports?from=&to=
///
/// Defaults to the last 30 days; longer ranges are cut to 366 days ending
/// at `to`.
pub async fn get_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let (from, to) = range.resolve(today)?;

    let habits = HabitRepo::list(&state.pool, auth.user_id).await?;
    // Streaks may reach back before `from`, so every log is loaded.
    let logs = HabitLogRepo::list_all_for_user(&state.pool, auth.user_id).await?;
    let goals = GoalRepo::list(&state.pool, auth.user_id).await?;
    let tasks = TaskRepo::list(&state.pool, auth.user_id).await?;

    let (overview, heatmap) = ReportOverview::compute(ReportInput {
        habits: &habits,
        logs: &logs,
        goals: &goals,
        tasks: &tasks,
        from,
        to,
        today,
    });

    tracing::debug!(user_id = auth.user_id, %from, %to, "Report computed");

    Ok(Json(DataResponse {
        data: Report { overview, heatmap },
    }))
}
