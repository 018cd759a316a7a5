pub mod auth;
pub mod goals;
pub mod habits;
pub mod health;
pub mod profile;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                      WebSocket (token in query)
///
/// /auth/signup                             signup (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout
///
/// /me                                      get, patch, delete account
/// /me/language                             set language + locale cookie (PUT)
/// /me/theme                                set theme (PUT)
/// /locale                                  negotiated language
/// /catalog                                 units, colors, icons, pickers
///
/// /habits                                  list, create
/// /habits/today                            habits due today
/// /habits/{id}                             get, patch, delete
/// /habits/{id}/archive                     archive flag (PUT)
/// /habits/{id}/logs                        list, log
///
/// /goals                                   list, create
/// /goals/{id}                              get, patch, delete
/// /goals/{id}/progress                     set progress (PUT)
/// /goals/{id}/archive                      archive flag (PUT)
///
/// /tasks                                   list, create (quick add)
/// /tasks/{id}                              get, patch, delete
/// /tasks/{id}/toggle                       toggle status (POST)
/// /tasks/{id}/checklist/{item_id}/toggle   toggle checklist item (POST)
///
/// /dashboard                               stats cards
/// /reports                                 overview + heatmap
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/me", profile::router())
        .route("/locale", get(handlers::locale::get_locale))
        .route("/catalog", get(handlers::catalog::get_catalog))
        .nest("/habits", habits::router())
        .nest("/goals", goals::router())
        .nest("/tasks", tasks::router())
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/reports", get(handlers::reports::get_report))
}
