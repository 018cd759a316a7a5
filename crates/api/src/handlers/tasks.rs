//! Handlers for `/tasks`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::confirmation::verify_confirmation;
use habitsgoals_core::error::CoreError;
use habitsgoals_core::filtering::TaskFilter;
use habitsgoals_core::stats::TaskStats;
use habitsgoals_core::task::{TaskPriority, TaskStatus};
use habitsgoals_core::types::{Day, DbId};
use habitsgoals_core::validation::{
    normalize_checklist, normalize_description, normalize_title, toggle_checklist_item,
    validate_appearance, validate_clocks, validate_due_time, ChecklistItemInput,
};
use habitsgoals_db::models::task::{CreateTask, Task, UpdateTask};
use habitsgoals_db::repositories::{GoalRepo, TaskRepo};
use habitsgoals_events::{ChangeEvent, Collection};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ConfirmParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Full form and quick-add share this shape; quick-add sends only `title`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub due_date: Option<Day>,
    pub due_time: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    pub goal_id: Option<DbId>,
    pub project_id: Option<String>,
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItemInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
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
    pub checklist: Option<Vec<ChecklistItemInput>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks?search=&priority=&status=&view=
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<impl IntoResponse> {
    let today = state.today_for(auth.user_id).await?;
    let tasks = TaskRepo::list(&state.pool, auth.user_id).await?;

    let stats = TaskStats::compute(&tasks, today);
    Ok(Json(ListResponse {
        data: filter.apply(tasks, today),
        stats,
    }))
}

/// POST /api/v1/tasks
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let create = validate_create(input)?;
    if let Some(goal_id) = create.goal_id {
        ensure_goal_owned(&state, auth.user_id, goal_id).await?;
    }

    let task = TaskRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");
    state.publish(ChangeEvent::created(Collection::Tasks, auth.user_id, task.id));

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = find_task(&state, auth.user_id, task_id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let update = validate_update(input)?;
    if let Some(goal_id) = update.goal_id {
        ensure_goal_owned(&state, auth.user_id, goal_id).await?;
    }

    let task = TaskRepo::update(&state.pool, auth.user_id, task_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))?;

    tracing::info!(user_id = auth.user_id, task_id, "Task updated");
    state.publish(ChangeEvent::updated(Collection::Tasks, auth.user_id, task_id));

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}?confirm=DELETAR
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    verify_confirmation(params.confirm.as_deref())?;

    let deleted = TaskRepo::delete(&state.pool, auth.user_id, task_id).await?;
    if !deleted {
        return Err(AppError::not_found("Task", task_id));
    }

    tracing::info!(user_id = auth.user_id, task_id, "Task deleted");
    state.publish(ChangeEvent::deleted(Collection::Tasks, auth.user_id, task_id));

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tasks/{id}/toggle
///
/// `done` reopens as `todo`; `todo` and `doing` become `done`.
pub async fn toggle_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = find_task(&state, auth.user_id, task_id).await?;
    let next = current.status.toggled();

    let task = TaskRepo::set_status(&state.pool, auth.user_id, task_id, next)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))?;

    tracing::info!(user_id = auth.user_id, task_id, status = %next, "Task toggled");
    state.publish(ChangeEvent::updated(Collection::Tasks, auth.user_id, task_id));

    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/tasks/{id}/checklist/{item_id}/toggle
pub async fn toggle_checklist(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((task_id, item_id)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let task = find_task(&state, auth.user_id, task_id).await?;

    let mut checklist = task.checklist.0;
    if !toggle_checklist_item(&mut checklist, &item_id) {
        return Err(AppError::NotFound(format!(
            "Checklist item '{item_id}' not found in task {task_id}"
        )));
    }

    let task = TaskRepo::set_checklist(&state.pool, auth.user_id, task_id, &checklist)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))?;

    state.publish(ChangeEvent::updated(Collection::Tasks, auth.user_id, task_id));

    Ok(Json(DataResponse { data: task }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_task(state: &AppState, user_id: DbId, task_id: DbId) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, user_id, task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))
}

async fn ensure_goal_owned(state: &AppState, user_id: DbId, goal_id: DbId) -> AppResult<()> {
    match GoalRepo::find_by_id(&state.pool, user_id, goal_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::validation(format!("Goal {goal_id} does not exist")).into()),
    }
}

fn validate_create(input: CreateTaskRequest) -> Result<CreateTask, CoreError> {
    let title = normalize_title(&input.title)?;
    let description = normalize_description(input.description)?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    validate_due_time(input.due_time.as_deref())?;
    validate_clocks("reminders", &input.reminders)?;

    Ok(CreateTask {
        title,
        description,
        color: input.color,
        icon: input.icon,
        due_date: input.due_date,
        due_time: input.due_time,
        priority: input.priority,
        status: input.status,
        goal_id: input.goal_id,
        project_id: input.project_id,
        reminders: input.reminders,
        checklist: normalize_checklist(input.checklist)?,
    })
}

fn validate_update(input: UpdateTaskRequest) -> Result<UpdateTask, CoreError> {
    let title = input.title.as_deref().map(normalize_title).transpose()?;
    validate_appearance(input.color.as_deref(), input.icon.as_deref())?;
    validate_due_time(input.due_time.as_deref())?;
    if let Some(reminders) = input.reminders.as_deref() {
        validate_clocks("reminders", reminders)?;
    }

    Ok(UpdateTask {
        title,
        description: normalize_description(input.description)?,
        color: input.color,
        icon: input.icon,
        due_date: input.due_date,
        due_time: input.due_time,
        priority: input.priority,
        status: input.status,
        goal_id: input.goal_id,
        project_id: input.project_id,
        reminders: input.reminders,
        checklist: input.checklist.map(normalize_checklist).transpose()?,
    })
}
