//! Route definitions for the `/habits` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// Routes mounted at `/habits`.
///
/// ```text
/// GET    /                -> list_habits
/// POST   /                -> create_habit
/// GET    /today           -> today_habits
/// GET    /{id}            -> get_habit
/// PATCH  /{id}            -> update_habit
/// DELETE /{id}?confirm=   -> delete_habit
/// PUT    /{id}/archive    -> archive_habit
/// GET    /{id}/logs       -> list_habit_logs
/// POST   /{id}/logs       -> log_habit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habits::list_habits).post(habits::create_habit))
        .route("/today", get(habits::today_habits))
        .route(
            "/{id}",
            get(habits::get_habit)
                .patch(habits::update_habit)
                .delete(habits::delete_habit),
        )
        .route("/{id}/archive", put(habits::archive_habit))
        .route(
            "/{id}/logs",
            get(habits::list_habit_logs).post(habits::log_habit),
        )
}
