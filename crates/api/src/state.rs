use std::sync::Arc;

use chrono_tz::Tz;
use habitsgoals_core::types::{Day, DbId};
use habitsgoals_events::{ChangeEvent, EventBus};

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::sync::snapshot::{user_timezone, user_today};
use crate::ws::WsManager;

/// Shared state handed to every handler via `State<AppState>`. Cheap to
/// clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: habitsgoals_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub ws_manager: Arc<WsManager>,
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Announce a committed change to the snapshot publisher.
    pub fn publish(&self, event: ChangeEvent) {
        self.event_bus.publish(event);
    }

    /// The user's profile timezone, else the configured default.
    pub async fn timezone_for(&self, user_id: DbId) -> AppResult<Tz> {
        Ok(user_timezone(&self.pool, user_id, self.config.default_timezone).await?)
    }

    /// Today in the user's profile timezone.
    pub async fn today_for(&self, user_id: DbId) -> AppResult<Day> {
        Ok(user_today(&self.pool, user_id, self.config.default_timezone).await?)
    }
}
