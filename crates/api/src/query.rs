//! Query parameter types shared across handler modules.

use chrono::Duration;
use habitsgoals_core::error::CoreError;
use habitsgoals_core::stats::{DEFAULT_REPORT_DAYS, MAX_REPORT_DAYS};
use habitsgoals_core::types::Day;
use serde::Deserialize;

/// `?confirm=` on delete endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    pub confirm: Option<String>,
}

/// `?from=&to=` day range. Both bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub from: Option<Day>,
    pub to: Option<Day>,
}

impl DateRangeParams {
    /// Fill in the defaults (the 30 days ending `to`, `to` = today) and cap
    /// the span at [`MAX_REPORT_DAYS`] by moving `from` forward.
    pub fn resolve(&self, today: Day) -> Result<(Day, Day), CoreError> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => days_before(to, DEFAULT_REPORT_DAYS - 1)?,
        };
        if from > to {
            return Err(CoreError::validation(format!(
                "Invalid range: from ({from}) is after to ({to})"
            )));
        }
        let earliest = days_before(to, MAX_REPORT_DAYS - 1).unwrap_or(Day::MIN);
        Ok((from.max(earliest), to))
    }
}

fn days_before(day: Day, days: i64) -> Result<Day, CoreError> {
    day.checked_sub_signed(Duration::days(days))
        .ok_or_else(|| CoreError::validation(format!("Date {day} is out of range")))
}
