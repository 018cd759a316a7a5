//! Calendar-day helpers.
//!
//! Habit logs, deadlines and due dates are stored as plain calendar days.
//! "Today" is always computed in the owning user's timezone, so every
//! comparison here takes `today` as an argument and stays deterministic.

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::types::Day;

/// Storage / wire format for calendar days.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Storage / wire format for clock times (reminders, due times).
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Resolve an IANA timezone name, falling back when it is missing or unknown.
pub fn resolve_timezone(name: Option<&str>, fallback: Tz) -> Tz {
    name.and_then(|n| n.parse::<Tz>().ok()).unwrap_or(fallback)
}

/// Check that a timezone name is a known IANA zone.
pub fn validate_timezone(name: &str) -> Result<Tz, CoreError> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::validation(format!("Unknown timezone '{name}'")))
}

/// The current calendar day in `tz`.
pub fn today_in(tz: Tz) -> Day {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_day(s: &str) -> Result<Day, CoreError> {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
        .map_err(|_| CoreError::validation(format!("Invalid date '{s}', expected YYYY-MM-DD")))
}

/// Parse an `HH:MM` string.
pub fn parse_clock(s: &str) -> Result<NaiveTime, CoreError> {
    // chrono accepts single-digit hours with %H; the stored form is always
    // zero-padded, so enforce the length too.
    if s.len() != 5 {
        return Err(CoreError::validation(format!(
            "Invalid time '{s}', expected HH:MM"
        )));
    }
    NaiveTime::parse_from_str(s, CLOCK_FORMAT)
        .map_err(|_| CoreError::validation(format!("Invalid time '{s}', expected HH:MM")))
}

/// Signed number of days from `today` until `date` (negative when past).
pub fn days_until(date: Day, today: Day) -> i64 {
    (date - today).num_days()
}

/// A date is overdue when it lies strictly before today.
pub fn is_overdue(date: Day, today: Day) -> bool {
    days_until(date, today) < 0
}

/// Weekday index with Sunday = 0 ... Saturday = 6.
pub fn weekday_index(date: Day) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Inclusive iterator over the days between `from` and `to`.
///
/// Yields nothing when `from > to`.
pub fn date_range(from: Day, to: Day) -> impl Iterator<Item = Day> {
    from.iter_days().take_while(move |d| *d <= to)
}

/// Weekday code and its labels in both supported languages.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct WeekdayInfo {
    pub value: u8,
    pub label_pt: &'static str,
    pub label_en: &'static str,
}

pub const WEEKDAYS: [WeekdayInfo; 7] = [
    WeekdayInfo { value: 0, label_pt: "Domingo", label_en: "Sunday" },
    WeekdayInfo { value: 1, label_pt: "Segunda", label_en: "Monday" },
    WeekdayInfo { value: 2, label_pt: "Terça", label_en: "Tuesday" },
    WeekdayInfo { value: 3, label_pt: "Quarta", label_en: "Wednesday" },
    WeekdayInfo { value: 4, label_pt: "Quinta", label_en: "Thursday" },
    WeekdayInfo { value: 5, label_pt: "Sexta", label_en: "Friday" },
    WeekdayInfo { value: 6, label_pt: "Sábado", label_en: "Saturday" },
];
