//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                                -> list_tasks
/// POST   /                                -> create_task
/// GET    /{id}                            -> get_task
/// PATCH  /{id}                            -> update_task
/// DELETE /{id}?confirm=                   -> delete_task
/// POST   /{id}/toggle                     -> toggle_task
/// POST   /{id}/checklist/{item_id}/toggle -> toggle_checklist
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/toggle", post(tasks::toggle_task))
        .route(
            "/{id}/checklist/{item_id}/toggle",
            post(tasks::toggle_checklist),
        )
}
