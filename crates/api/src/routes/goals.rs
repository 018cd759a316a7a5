//! Route definitions for the `/goals` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Routes mounted at `/goals`.
///
/// ```text
/// GET    /                -> list_goals
/// POST   /                -> create_goal
/// GET    /{id}            -> get_goal
/// PATCH  /{id}            -> update_goal
/// DELETE /{id}?confirm=   -> delete_goal
/// PUT    /{id}/progress   -> set_progress
/// PUT    /{id}/archive    -> archive_goal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/{id}",
            get(goals::get_goal)
                .patch(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route("/{id}/progress", put(goals::set_progress))
        .route("/{id}/archive", put(goals::archive_goal))
}
