//! Handler for `GET /catalog`.

use axum::response::IntoResponse;
use axum::Json;
use habitsgoals_core::catalog::{ColorInfo, IconInfo, UnitInfo, COLORS, ICONS, UNITS};
use habitsgoals_core::dates::{WeekdayInfo, WEEKDAYS};
use habitsgoals_core::task::{ChoiceInfo, PRIORITIES, TASK_STATUSES};
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub units: &'static [UnitInfo],
    pub colors: &'static [ColorInfo],
    pub icons: &'static [IconInfo],
    pub priorities: &'static [ChoiceInfo],
    pub task_statuses: &'static [ChoiceInfo],
    pub weekdays: &'static [WeekdayInfo],
}

/// GET /api/v1/catalog
///
/// Static pick-lists used by the habit, goal and task forms.
pub async fn get_catalog(_auth: AuthUser) -> impl IntoResponse {
    Json(DataResponse {
        data: Catalog {
            units: UNITS,
            colors: COLORS,
            icons: ICONS,
            priorities: &PRIORITIES,
            task_statuses: &TASK_STATUSES,
            weekdays: &WEEKDAYS,
        },
    })
}
