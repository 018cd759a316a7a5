//! Handlers for `/habits` and their daily logs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono_tz::Tz;
use habitsgoals_core::catalog::{DEFAULT_COLOR, DEFAULT_ICON};
use habitsgoals_core::confirmation::verify_confirmation;
use habitsgoals_core::dates::validate_timezone;
use habitsgoals_core::error::CoreError;
use habitsgoals_core::filtering::HabitFilter;
use habitsgoals_core::frequency::Frequency;
use habitsgoals_core::progress::{habit_done, habit_progress};
use habitsgoals_core::records::HabitRecord;
use habitsgoals_core::stats::{best_streak, current_streak, habit_completed_days, log_for_day, HabitStats};
use habitsgoals_core::types::{Day, DbId};
use habitsgoals_core::validation::{
    normalize_description, normalize_title, validate_appearance, validate_clocks,
    validate_habit_quantity, validate_log_value,
};
use habitsgoals_db::models::habit::{CreateHabit, Habit, UpdateHabit};
use habitsgoals_db::models::habit_log::{CreateHabitLog, HabitLog};
use habitsgoals_db::repositories::{HabitLogRepo, HabitRepo};
use habitsgoals_events::{ChangeEvent, ChangeOp, Collection};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::locale::RequestLocale;
use crate::query::{ConfirmParams, DateRangeParams};
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub remind_at: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub archived: bool,
}

#[derive(Debug, Deserialize)]
pub struct LogHabitRequest {
    /// Defaults to today in the user's timezone.
    pub date: Option<Day>,
    #[serde(default)]
    pub completed: bool,
    pub value: Option<f64>,
}

/// A habit due today with its check-in state.
#[derive(Debug, Serialize)]
pub struct TodayHabit {
    #[serde(flatten)]
    pub habit: Habit,
    pub schedule: String,
    pub log: Option<HabitLog>,
    pub progress: f64,
    pub done: bool,
    pub current_streak: u32,
    pub best_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct LoggedHabit {
    pub log: HabitLog,
    pub progress: f64,
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

/// GET /api/v1/habits?search=&status=
///
/// Stats describe every habit of the user, not just the filtered ones.
pub async fn list_habits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<HabitFilter>,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let habits = HabitRepo::list(&state.pool, auth.user_id).await?;
    let logs = HabitLogRepo::list_for_user(&state.pool, auth.user_id, today, today).await?;

    let stats = HabitStats::compute(&habits, &logs, today);
    Ok(Json(ListResponse {
        data: filter.apply(habits),
        stats,
    }))
}

/// POST /api/v1/habits
pub async fn create_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHabitRequest>,
) -> AppResult<impl IntoResponse> {
    let user_tz = state.timezone_for(auth.user_id).await?;
    let create = validate_create(input, user_tz)?;
    let habit = HabitRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(user_id = auth.user_id, habit_id = habit.id, "Habit created");
    state.publish(ChangeEvent::created(Collection::Habits, auth.user_id, habit.id));

    Ok((StatusCode::CREATED, Json(DataResponse { data: habit })))
}

/// GET /api/v1/habits/{id}
pub async fn get_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let habit = find_habit(&state, auth.user_id, habit_id).await?;
    Ok(Json(DataResponse { data: habit }))
}

/// PATCH /api/v1/habits/{id}
///
/// The unit/target pairing is checked against the stored values, so a
/// patch may change just one of them.
pub async fn update_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
    Json(mut input): Json<UpdateHabit>,
) -> AppResult<impl IntoResponse> {
    let existing = find_habit(&state, auth.user_id, habit_id).await?;
    validate_update(&existing, &mut input)?;

    let habit = HabitRepo::update(&state.pool, auth.user_id, habit_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Habit", habit_id))?;

    tracing::info!(user_id = auth.user_id, habit_id, "Habit updated");
    state.publish(ChangeEvent::updated(Collection::Habits, auth.user_id, habit_id));

    Ok(Json(DataResponse { data: habit }))
}

/// PUT /api/v1/habits/{id}/archive
pub async fn archive_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
    Json(input): Json<ArchiveRequest>,
) -> AppResult<impl IntoResponse> {
    let habit = HabitRepo::set_archived(&state.pool, auth.user_id, habit_id, input.archived)
        .await?
        .ok_or_else(|| AppError::not_found("Habit", habit_id))?;

    tracing::info!(user_id = auth.user_id, habit_id, archived = input.archived, "Habit archive flag set");
    state.publish(ChangeEvent::updated(Collection::Habits, auth.user_id, habit_id));

    Ok(Json(DataResponse { data: habit }))
}

/// DELETE /api/v1/habits/{id}?confirm=DELETAR
///
/// Removes the habit and all of its logs.
pub async fn delete_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    verify_confirmation(params.confirm.as_deref())?;

    let deleted = HabitRepo::delete(&state.pool, auth.user_id, habit_id).await?;
    if !deleted {
        return Err(AppError::not_found("Habit", habit_id));
    }

    tracing::info!(user_id = auth.user_id, habit_id, "Habit deleted");
    state.publish(ChangeEvent::deleted(Collection::Habits, auth.user_id, habit_id));
    state.publish(ChangeEvent::new(Collection::HabitLogs, auth.user_id, ChangeOp::Deleted));

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/habits/today
///
/// Habits due today with today's log, progress and streaks.
pub async fn today_habits(
    auth: AuthUser,
    State(state): State<AppState>,
    RequestLocale(language): RequestLocale,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let habits = HabitRepo::list(&state.pool, auth.user_id).await?;
    let logs = HabitLogRepo::list_all_for_user(&state.pool, auth.user_id).await?;

    let stats = HabitStats::compute(&habits, &logs, today);
    let data = due_today(habits, &logs, today, |f| f.describe(language));

    Ok(Json(ListResponse { data, stats }))
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// POST /api/v1/habits/{id}/logs
///
/// Appends a check-in. Several logs for the same day are allowed; the
/// newest one is the one that counts.
pub async fn log_habit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
    Json(input): Json<LogHabitRequest>,
) -> AppResult<impl IntoResponse> {
    validate_log_value(input.value)?;
    let habit = find_habit(&state, auth.user_id, habit_id).await?;

    let date = match input.date {
        Some(date) => date,
        None => state.today_for(auth.user_id).await?,
    };
    let done = habit_done(habit.target, input.completed, input.value);

    let log = HabitLogRepo::create(
        &state.pool,
        auth.user_id,
        &CreateHabitLog {
            habit_id,
            date,
            completed: done,
            value: input.value,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, habit_id, %date, done, "Habit logged");
    state.publish(ChangeEvent::created(Collection::HabitLogs, auth.user_id, log.id));

    let progress = habit_progress(habit.target, log.completed, log.value);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LoggedHabit { log, progress, done },
        }),
    ))
}

/// GET /api/v1/habits/{id}/logs?from=&to=
///
/// Defaults to the last 30 days, newest first.
pub async fn list_habit_logs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(habit_id): Path<DbId>,
    Query(range): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    find_habit(&state, auth.user_id, habit_id).await?;
    let today = state.today_for(auth.user_id).await?;
    let (from, to) = range.resolve(today)?;

    let logs = HabitLogRepo::list_for_habit(&state.pool, auth.user_id, habit_id, from, to).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_habit(state: &AppState, user_id: DbId, habit_id: DbId) -> AppResult<Habit> {
    HabitRepo::find_by_id(&state.pool, user_id, habit_id)
        .await?
        .ok_or_else(|| AppError::not_found("Habit", habit_id))
}

/// Build the "today" rows for every habit due on `today`.
pub(crate) fn due_today(
    habits: Vec<Habit>,
    logs: &[HabitLog],
    today: Day,
    schedule: impl Fn(&Frequency) -> String,
) -> Vec<TodayHabit> {
    habits
        .into_iter()
        .filter(|h| h.is_due_on(today))
        .map(|habit| {
            let log = log_for_day(logs, habit.id, today).cloned();
            let (completed, value) = log.as_ref().map_or((false, None), |l| (l.completed, l.value));
            let days = habit_completed_days(&habit, logs);
            TodayHabit {
                schedule: schedule(&habit.frequency.0),
                progress: habit_progress(habit.target, completed, value),
                done: habit_done(habit.target, completed, value),
                current_streak: current_streak(&days, today),
                best_streak: best_streak(&days),
                log,
                habit,
            }
        })
        .collect()
}

/// A habit sent without a timezone takes the owner's, so its first due day
/// matches the owner's "today".
fn validate_create(input: CreateHabitRequest, user_tz: Tz) -> Result<CreateHabit, CoreError> {
    let title = normalize_title(&input.title)?;
    let description = normalize_description(input.description)?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    let frequency = input.frequency.normalized()?;
    validate_habit_quantity(input.unit.as_deref(), input.target)?;
    let timezone = input
        .timezone
        .as_deref()
        .map(|tz| validate_timezone(tz.trim()))
        .transpose()?
        .unwrap_or(user_tz)
        .name()
        .to_string();
    validate_clocks("remind_at", &input.remind_at)?;

    Ok(CreateHabit {
        title,
        description,
        color: Some(input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
        icon: Some(input.icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
        frequency,
        unit: input.unit,
        target: input.target,
        timezone: Some(timezone),
        remind_at: input.remind_at,
    })
}

fn validate_update(existing: &Habit, input: &mut UpdateHabit) -> Result<(), CoreError> {
    if let Some(title) = input.title.as_deref() {
        input.title = Some(normalize_title(title)?);
    }
    input.description = normalize_description(input.description.take())?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    if let Some(frequency) = input.frequency.take() {
        input.frequency = Some(frequency.normalized()?);
    }
    validate_habit_quantity(
        input.unit.as_deref().or(existing.unit.as_deref()),
        input.target.or(existing.target),
    )?;
    if let Some(tz) = input.timezone.as_deref() {
        input.timezone = Some(validate_timezone(tz.trim())?.name().to_string());
    }
    if let Some(remind_at) = input.remind_at.as_deref() {
        validate_clocks("remind_at", remind_at)?;
    }
    Ok(())
}
