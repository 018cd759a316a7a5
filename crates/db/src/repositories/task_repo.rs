//! Repository for the `tasks` table.

use habitsgoals_core::task::{TaskPriority, TaskStatus};
use habitsgoals_core::types::DbId;
use habitsgoals_core::validation::ChecklistItem;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

const COLUMNS: &str = "id, user_id, title, description, color, icon, due_date, due_time, \
                        priority, status, goal_id, project_id, reminders, checklist, \
                        created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    pub async fn create(pool: &PgPool, user_id: DbId, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (user_id, title, description, color, icon, due_date, due_time, priority,
                 status, goal_id, project_id, reminders, checklist)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.due_date)
            .bind(&input.due_time)
            .bind(input.priority.as_str())
            .bind(input.status.as_str())
            .bind(input.goal_id)
            .bind(&input.project_id)
            .bind(&input.reminders)
            .bind(Json(&input.checklist))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, user_id: DbId, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All tasks of the user, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                color = COALESCE($5, color),
                icon = COALESCE($6, icon),
                due_date = COALESCE($7, due_date),
                due_time = COALESCE($8, due_time),
                priority = COALESCE($9, priority),
                status = COALESCE($10, status),
                goal_id = COALESCE($11, goal_id),
                project_id = COALESCE($12, project_id),
                reminders = COALESCE($13, reminders),
                checklist = COALESCE($14, checklist)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.due_date)
            .bind(&input.due_time)
            .bind(input.priority.map(TaskPriority::as_str))
            .bind(input.status.map(TaskStatus::as_str))
            .bind(input.goal_id)
            .bind(&input.project_id)
            .bind(&input.reminders)
            .bind(input.checklist.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn set_checklist(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        checklist: &[ChecklistItem],
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET checklist = $3
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(Json(checklist))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
