use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET    /           -> get_profile
/// PATCH  /           -> update_profile
/// DELETE /           -> delete_account
/// PUT    /language   -> set_language
/// PUT    /theme      -> set_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(profile::get_profile)
                .patch(profile::update_profile)
                .delete(profile::delete_account),
        )
        .route("/language", put(profile::set_language))
        .route("/theme", put(profile::set_theme))
}
