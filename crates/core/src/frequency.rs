//! Habit recurrence.
//!
//! A frequency is one of four shapes. The `custom` shape carries an RRULE
//! string that is stored verbatim and never evaluated: a custom habit is
//! treated as due every day.

use serde::{Deserialize, Serialize};

use crate::dates::weekday_index;
use crate::error::CoreError;
use crate::locale::Language;
use crate::types::Day;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Frequency {
    Daily {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        times: Option<u32>,
    },
    /// Weekday indices, 0 = Sunday ... 6 = Saturday.
    Weekly { days: Vec<u8> },
    /// Days of the month, 1..=31.
    Monthly { dates: Vec<u8> },
    Custom { rrule: String },
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily { times: None }
    }
}

impl Frequency {
    /// Validate and canonicalise: day lists are sorted and deduplicated.
    pub fn normalized(self) -> Result<Self, CoreError> {
        match self {
            Frequency::Daily { times: Some(0) } => Err(CoreError::validation(
                "Daily frequency must be at least once per day",
            )),
            Frequency::Daily { times } => Ok(Frequency::Daily { times }),
            Frequency::Weekly { days } => {
                let days = sorted_unique(days);
                if days.is_empty() {
                    return Err(CoreError::validation(
                        "Weekly frequency needs at least one weekday",
                    ));
                }
                if let Some(bad) = days.iter().find(|d| **d > 6) {
                    return Err(CoreError::validation(format!(
                        "Invalid weekday {bad}: must be between 0 (Sunday) and 6 (Saturday)"
                    )));
                }
                Ok(Frequency::Weekly { days })
            }
            Frequency::Monthly { dates } => {
                let dates = sorted_unique(dates);
                if dates.is_empty() {
                    return Err(CoreError::validation(
                        "Monthly frequency needs at least one day of the month",
                    ));
                }
                if let Some(bad) = dates.iter().find(|d| !(1..=31).contains(*d)) {
                    return Err(CoreError::validation(format!(
                        "Invalid day of month {bad}: must be between 1 and 31"
                    )));
                }
                Ok(Frequency::Monthly { dates })
            }
            Frequency::Custom { rrule } => {
                let rrule = rrule.trim().to_string();
                if rrule.is_empty() {
                    return Err(CoreError::validation("Custom frequency needs a rule"));
                }
                Ok(Frequency::Custom { rrule })
            }
        }
    }

    /// Whether a habit with this frequency is scheduled on `day`.
    pub fn is_due_on(&self, day: Day) -> bool {
        use chrono::Datelike;

        match self {
            Frequency::Daily { .. } | Frequency::Custom { .. } => true,
            Frequency::Weekly { days } => days.contains(&weekday_index(day)),
            Frequency::Monthly { dates } => dates.contains(&(day.day() as u8)),
        }
    }

    /// Short label for cards and lists.
    pub fn describe(&self, language: Language) -> String {
        match (self, language) {
            (Frequency::Daily { times: Some(n) }, Language::PtBr) => format!("{n}x por dia"),
            (Frequency::Daily { times: Some(n) }, Language::EnUs) => format!("{n}x per day"),
            (Frequency::Daily { times: None }, Language::PtBr) => "Diário".to_string(),
            (Frequency::Daily { times: None }, Language::EnUs) => "Daily".to_string(),
            (Frequency::Weekly { days }, Language::PtBr) => {
                format!("{} dias por semana", days.len())
            }
            (Frequency::Weekly { days }, Language::EnUs) => {
                format!("{} days per week", days.len())
            }
            (Frequency::Monthly { dates }, Language::PtBr) => {
                format!("{} dias por mês", dates.len())
            }
            (Frequency::Monthly { dates }, Language::EnUs) => {
                format!("{} days per month", dates.len())
            }
            (Frequency::Custom { .. }, Language::PtBr) => "Personalizado".to_string(),
            (Frequency::Custom { .. }, Language::EnUs) => "Custom".to_string(),
        }
    }
}

fn sorted_unique(mut values: Vec<u8>) -> Vec<u8> {
    values.sort_unstable();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_day;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn wire_format_is_tagged_by_kind() {
        let f: Frequency = serde_json::from_value(json!({"kind": "weekly", "days": [1, 3]})).unwrap();
        assert_eq!(f, Frequency::Weekly { days: vec![1, 3] });

        let f: Frequency = serde_json::from_value(json!({"kind": "daily"})).unwrap();
        assert_eq!(f, Frequency::Daily { times: None });
        assert_eq!(serde_json::to_value(&f).unwrap(), json!({"kind": "daily"}));

        let f: Frequency =
            serde_json::from_value(json!({"kind": "custom", "rrule": "FREQ=DAILY;INTERVAL=2"}))
                .unwrap();
        assert_matches!(f, Frequency::Custom { .. });
    }

    #[test]
    fn weekly_days_are_sorted_and_deduplicated() {
        let f = Frequency::Weekly { days: vec![5, 1, 5, 3] }.normalized().unwrap();
        assert_eq!(f, Frequency::Weekly { days: vec![1, 3, 5] });
    }

    #[test]
    fn out_of_range_days_are_rejected() {
        assert!(Frequency::Weekly { days: vec![7] }.normalized().is_err());
        assert!(Frequency::Weekly { days: vec![] }.normalized().is_err());
        assert!(Frequency::Monthly { dates: vec![0] }.normalized().is_err());
        assert!(Frequency::Monthly { dates: vec![32] }.normalized().is_err());
        assert!(Frequency::Daily { times: Some(0) }.normalized().is_err());
        assert!(Frequency::Custom { rrule: "  ".into() }.normalized().is_err());
    }

    #[test]
    fn due_days_follow_the_shape() {
        let sunday = parse_day("2024-03-10").unwrap();
        let monday = parse_day("2024-03-11").unwrap();

        let weekly = Frequency::Weekly { days: vec![0] };
        assert!(weekly.is_due_on(sunday));
        assert!(!weekly.is_due_on(monday));

        let monthly = Frequency::Monthly { dates: vec![11] };
        assert!(monthly.is_due_on(monday));
        assert!(!monthly.is_due_on(sunday));

        assert!(Frequency::default().is_due_on(monday));
        assert!(Frequency::Custom { rrule: "FREQ=YEARLY".into() }.is_due_on(monday));
    }

    #[test]
    fn describe_uses_language() {
        let f = Frequency::Daily { times: Some(2) };
        assert_eq!(f.describe(Language::PtBr), "2x por dia");
        assert_eq!(f.describe(Language::EnUs), "2x per day");
        let f = Frequency::Weekly { days: vec![1, 2, 3] };
        assert_eq!(f.describe(Language::PtBr), "3 dias por semana");
    }
}
