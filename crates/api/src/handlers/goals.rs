//! Handlers for `/goals`.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::confirmation::verify_confirmation;
use habitsgoals_core::error::CoreError;
use habitsgoals_core::filtering::GoalFilter;
use habitsgoals_core::stats::GoalStats;
use habitsgoals_core::types::{Day, DbId};
use habitsgoals_core::validation::{
    normalize_description, normalize_milestones, normalize_title, validate_appearance,
    validate_goal_quantity, validate_progress_value, MilestoneInput,
};
use habitsgoals_db::models::goal::{CreateGoal, Goal, GoalView, UpdateGoal};
use habitsgoals_db::repositories::{GoalRepo, HabitRepo};
use habitsgoals_events::{ChangeEvent, Collection};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ConfirmParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<Day>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    #[serde(default)]
    pub progress_value: f64,
    #[serde(default)]
    pub milestones: Vec<MilestoneInput>,
    #[serde(default)]
    pub linked_habits: Vec<DbId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub deadline: Option<Day>,
    pub unit: Option<String>,
    pub target_value: Option<f64>,
    pub progress_value: Option<f64>,
    pub milestones: Option<Vec<MilestoneInput>>,
    pub linked_habits: Option<Vec<DbId>>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress_value: f64,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub archived: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/goals?search=&status=
pub async fn list_goals(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<GoalFilter>,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let goals = GoalRepo::list(&state.pool, auth.user_id).await?;

    let stats = GoalStats::compute(&goals, today);
    let data = filter
        .apply(goals, today)
        .into_iter()
        .map(|g| GoalView::new(g, today))
        .collect();

    Ok(Json(ListResponse { data, stats }))
}

/// POST /api/v1/goals
pub async fn create_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGoalRequest>,
) -> AppResult<impl IntoResponse> {
    let create = validate_create(input)?;
    ensure_habits_owned(&state.pool, auth.user_id, &create.linked_habits).await?;

    let goal = GoalRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(user_id = auth.user_id, goal_id = goal.id, "Goal created");
    state.publish(ChangeEvent::created(Collection::Goals, auth.user_id, goal.id));

    let today = state.today_for(auth.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GoalView::new(goal, today),
        }),
    ))
}

/// GET /api/v1/goals/{id}
pub async fn get_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(goal_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let goal = find_goal(&state, auth.user_id, goal_id).await?;
    let today = state.today_for(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: GoalView::new(goal, today),
    }))
}

/// PATCH /api/v1/goals/{id}
pub async fn update_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(goal_id): Path<DbId>,
    Json(input): Json<UpdateGoalRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = find_goal(&state, auth.user_id, goal_id).await?;
    let update = validate_update(&existing, input)?;
    if let Some(linked) = update.linked_habits.as_deref() {
        ensure_habits_owned(&state.pool, auth.user_id, linked).await?;
    }

    let goal = GoalRepo::update(&state.pool, auth.user_id, goal_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))?;

    tracing::info!(user_id = auth.user_id, goal_id, "Goal updated");
    state.publish(ChangeEvent::updated(Collection::Goals, auth.user_id, goal_id));

    let today = state.today_for(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: GoalView::new(goal, today),
    }))
}

/// PUT /api/v1/goals/{id}/progress
pub async fn set_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(goal_id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<impl IntoResponse> {
    validate_progress_value(input.progress_value)?;

    let update = UpdateGoal {
        progress_value: Some(input.progress_value),
        ..Default::default()
    };
    let goal = GoalRepo::update(&state.pool, auth.user_id, goal_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))?;

    tracing::info!(user_id = auth.user_id, goal_id, progress = input.progress_value, "Goal progress set");
    state.publish(ChangeEvent::updated(Collection::Goals, auth.user_id, goal_id));

    let today = state.today_for(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: GoalView::new(goal, today),
    }))
}

/// PUT /api/v1/goals/{id}/archive
pub async fn archive_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(goal_id): Path<DbId>,
    Json(input): Json<ArchiveRequest>,
) -> AppResult<impl IntoResponse> {
    let update = UpdateGoal {
        is_archived: Some(input.archived),
        ..Default::default()
    };
    let goal = GoalRepo::update(&state.pool, auth.user_id, goal_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))?;

    state.publish(ChangeEvent::updated(Collection::Goals, auth.user_id, goal_id));

    let today = state.today_for(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: GoalView::new(goal, today),
    }))
}

/// DELETE /api/v1/goals/{id}?confirm=DELETAR
///
/// Tasks linked to the goal are kept and lose the link.
pub async fn delete_goal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(goal_id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    verify_confirmation(params.confirm.as_deref())?;

    let deleted = GoalRepo::delete(&state.pool, auth.user_id, goal_id).await?;
    if !deleted {
        return Err(AppError::not_found("Goal", goal_id));
    }

    tracing::info!(user_id = auth.user_id, goal_id, "Goal deleted");
    state.publish(ChangeEvent::deleted(Collection::Goals, auth.user_id, goal_id));
    state.publish(ChangeEvent::updated(Collection::Tasks, auth.user_id, goal_id));

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_goal(state: &AppState, user_id: DbId, goal_id: DbId) -> AppResult<Goal> {
    GoalRepo::find_by_id(&state.pool, user_id, goal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))
}

/// Every linked habit must belong to the user.
async fn ensure_habits_owned(pool: &PgPool, user_id: DbId, habit_ids: &[DbId]) -> AppResult<()> {
    if habit_ids.is_empty() {
        return Ok(());
    }
    let owned: HashSet<DbId> = HabitRepo::list(pool, user_id)
        .await?
        .into_iter()
        .map(|h| h.id)
        .collect();
    match habit_ids.iter().find(|id| !owned.contains(id)) {
        Some(unknown) => Err(CoreError::validation(format!("Linked habit {unknown} does not exist")).into()),
        None => Ok(()),
    }
}

fn dedup_ids(mut ids: Vec<DbId>) -> Vec<DbId> {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(*id));
    ids
}

fn validate_create(input: CreateGoalRequest) -> Result<CreateGoal, CoreError> {
    let title = normalize_title(&input.title)?;
    let description = normalize_description(input.description)?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    validate_goal_quantity(input.unit.as_deref(), input.target_value)?;
    validate_progress_value(input.progress_value)?;

    Ok(CreateGoal {
        title,
        description,
        color: input.color,
        icon: input.icon,
        deadline: input.deadline,
        unit: input.unit,
        target_value: input.target_value,
        progress_value: input.progress_value,
        milestones: normalize_milestones(input.milestones)?,
        linked_habits: dedup_ids(input.linked_habits),
    })
}

fn validate_update(existing: &Goal, input: UpdateGoalRequest) -> Result<UpdateGoal, CoreError> {
    let title = input.title.as_deref().map(normalize_title).transpose()?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    validate_goal_quantity(
        input.unit.as_deref().or(existing.unit.as_deref()),
        input.target_value.or(existing.target_value),
    )?;
    if let Some(value) = input.progress_value {
        validate_progress_value(value)?;
    }

    Ok(UpdateGoal {
        title,
        description: normalize_description(input.description)?,
        color: input.color,
        icon: input.icon,
        deadline: input.deadline,
        unit: input.unit,
        target_value: input.target_value,
        progress_value: input.progress_value,
        milestones: input.milestones.map(normalize_milestones).transpose()?,
        linked_habits: input.linked_habits.map(dedup_ids),
        is_archived: input.is_archived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn target_without_unit_is_rejected() {
        let input: CreateGoalRequest =
            serde_json::from_value(serde_json::json!({ "title": "Save", "target_value": 1000.0 }))
                .unwrap();
        assert_matches!(validate_create(input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn milestones_get_ids_and_links_are_deduplicated() {
        let input: CreateGoalRequest = serde_json::from_value(serde_json::json!({
            "title": "Marathon",
            "unit": "km",
            "target_value": 42.0,
            "milestones": [{ "title": " 10k " }],
            "linked_habits": [3, 3, 7]
        }))
        .unwrap();
        let create = validate_create(input).unwrap();
        assert_eq!(create.milestones[0].title, "10k");
        assert!(!create.milestones[0].id.is_empty());
        assert_eq!(create.linked_habits, vec![3, 7]);
    }

    #[test]
    fn negative_progress_is_rejected() {
        let input: CreateGoalRequest =
            serde_json::from_value(serde_json::json!({ "title": "Save", "progress_value": -1.0 }))
                .unwrap();
        assert_matches!(validate_create(input), Err(CoreError::Validation(_)));
    }
}
