//! Form validation for habits, goals and tasks.
//!
//! Each function rejects with [`CoreError::Validation`] before anything is
//! written. Functions named `normalize_*` also return the cleaned value
//! (trimmed text, generated ids) that should be stored instead of the raw
//! input.

use serde::{Deserialize, Serialize};

use crate::catalog::{validate_color, validate_icon, Unit};
use crate::dates::parse_clock;
use crate::error::CoreError;
use crate::types::Day;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Smallest accepted target for quantitative habits and goals.
pub const MIN_TARGET: f64 = 1.0;

// ---------------------------------------------------------------------------
// Shared fields
// ---------------------------------------------------------------------------

/// Trim and require a non-empty title.
pub fn normalize_title(raw: &str) -> Result<String, CoreError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(CoreError::validation("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

/// Trim a description; blank becomes `None`.
pub fn normalize_description(raw: Option<String>) -> Result<Option<String>, CoreError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if text.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(Some(text.to_string()))
}

pub fn validate_appearance(color: Option<&str>, icon: Option<&str>) -> Result<(), CoreError> {
    if let Some(color) = color {
        validate_color(color)?;
    }
    if let Some(icon) = icon {
        validate_icon(icon)?;
    }
    Ok(())
}

/// Every entry must be a 24h `HH:MM` clock.
pub fn validate_clocks(field: &str, values: &[String]) -> Result<(), CoreError> {
    for value in values {
        parse_clock(value)
            .map_err(|_| CoreError::validation(format!("{field}: '{value}' is not a valid HH:MM time")))?;
    }
    Ok(())
}

pub fn validate_unit(code: &str) -> Result<Unit, CoreError> {
    code.parse()
}

fn validate_target(field: &str, target: f64) -> Result<(), CoreError> {
    if !target.is_finite() || target < MIN_TARGET {
        return Err(CoreError::validation(format!(
            "{field} must be a number greater than or equal to {MIN_TARGET}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

/// A habit is either boolean (no unit, no target) or quantitative (both).
pub fn validate_habit_quantity(unit: Option<&str>, target: Option<f64>) -> Result<(), CoreError> {
    match (unit, target) {
        (None, None) => Ok(()),
        (Some(unit), Some(target)) => {
            validate_unit(unit)?;
            validate_target("Target", target)
        }
        (Some(_), None) => Err(CoreError::validation("Quantitative habits need a target")),
        (None, Some(_)) => Err(CoreError::validation("Quantitative habits need a unit")),
    }
}

/// A logged value, when present, must be finite and not negative.
pub fn validate_log_value(value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(CoreError::validation("Logged value must be zero or positive"))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

pub fn validate_goal_quantity(unit: Option<&str>, target_value: Option<f64>) -> Result<(), CoreError> {
    match (unit, target_value) {
        (None, None) => Ok(()),
        (Some(unit), Some(target)) => {
            validate_unit(unit)?;
            validate_target("Target value", target)
        }
        (Some(_), None) => Err(CoreError::validation("A goal with a unit needs a target value")),
        (None, Some(_)) => Err(CoreError::validation("A goal with a target value needs a unit")),
    }
}

pub fn validate_progress_value(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation("Progress value must be zero or positive"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub value: Option<f64>,
    pub deadline: Option<Day>,
}

/// Milestone as submitted by a form; the id is generated when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneInput {
    pub id: Option<String>,
    pub title: String,
    pub value: Option<f64>,
    pub deadline: Option<Day>,
}

pub fn normalize_milestones(input: Vec<MilestoneInput>) -> Result<Vec<Milestone>, CoreError> {
    input
        .into_iter()
        .map(|m| {
            let title = m.title.trim();
            if title.is_empty() {
                return Err(CoreError::validation("Milestone title is required"));
            }
            if let Some(value) = m.value {
                if !value.is_finite() || value < 0.0 {
                    return Err(CoreError::validation("Milestone value must be zero or positive"));
                }
            }
            Ok(Milestone {
                id: ensure_id(m.id),
                title: title.to_string(),
                value: m.value,
                deadline: m.deadline,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistItemInput {
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

pub fn normalize_checklist(input: Vec<ChecklistItemInput>) -> Result<Vec<ChecklistItem>, CoreError> {
    input
        .into_iter()
        .map(|item| {
            let text = item.text.trim();
            if text.is_empty() {
                return Err(CoreError::validation("Checklist item text is required"));
            }
            Ok(ChecklistItem {
                id: ensure_id(item.id),
                text: text.to_string(),
                done: item.done,
            })
        })
        .collect()
}

/// Flip `done` on the item with `item_id`. Returns `false` when no item
/// matched.
pub fn toggle_checklist_item(items: &mut [ChecklistItem], item_id: &str) -> bool {
    match items.iter_mut().find(|item| item.id == item_id) {
        Some(item) => {
            item.done = !item.done;
            true
        }
        None => false,
    }
}

pub fn validate_due_time(due_time: Option<&str>) -> Result<(), CoreError> {
    match due_time {
        Some(t) => parse_clock(t)
            .map(|_| ())
            .map_err(|_| CoreError::validation(format!("Due time '{t}' is not a valid HH:MM time"))),
        None => Ok(()),
    }
}

fn ensure_id(id: Option<String>) -> String {
    id.filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_title("  Drink water ").unwrap(), "Drink water");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_matches!(normalize_title(""), Err(CoreError::Validation(_)));
        assert_matches!(normalize_title("   \t"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert_matches!(normalize_title(&title), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(Some("  ".into())).unwrap(), None);
        assert_eq!(
            normalize_description(Some(" notes ".into())).unwrap(),
            Some("notes".to_string())
        );
        assert_eq!(normalize_description(None).unwrap(), None);
    }

    #[test]
    fn title_only_habit_is_boolean() {
        assert!(validate_habit_quantity(None, None).is_ok());
    }

    #[test]
    fn quantitative_habit_needs_unit_and_target() {
        assert!(validate_habit_quantity(Some("ml"), Some(2000.0)).is_ok());
        assert_matches!(validate_habit_quantity(Some("ml"), None), Err(CoreError::Validation(_)));
        assert_matches!(validate_habit_quantity(None, Some(5.0)), Err(CoreError::Validation(_)));
        assert_matches!(validate_habit_quantity(Some("ml"), Some(0.5)), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_habit_quantity(Some("ml"), Some(f64::INFINITY)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(validate_habit_quantity(Some("cups"), Some(3.0)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn goal_quantity_rules() {
        assert!(validate_goal_quantity(None, None).is_ok());
        assert!(validate_goal_quantity(Some("km"), Some(100.0)).is_ok());
        assert_matches!(validate_goal_quantity(Some("km"), Some(0.0)), Err(CoreError::Validation(_)));
        assert_matches!(validate_goal_quantity(None, Some(10.0)), Err(CoreError::Validation(_)));
        assert!(validate_progress_value(0.0).is_ok());
        assert_matches!(validate_progress_value(-1.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_progress_value(f64::NAN), Err(CoreError::Validation(_)));
    }

    #[test]
    fn clocks_must_be_hh_mm() {
        let ok = vec!["07:30".to_string(), "23:59".to_string()];
        assert!(validate_clocks("remind_at", &ok).is_ok());
        let bad = vec!["7:30".to_string()];
        assert_matches!(validate_clocks("remind_at", &bad), Err(CoreError::Validation(_)));
        assert_matches!(validate_due_time(Some("24:00")), Err(CoreError::Validation(_)));
        assert!(validate_due_time(None).is_ok());
    }

    #[test]
    fn appearance_checks_color_and_icon() {
        assert!(validate_appearance(Some("#ff8800"), Some("book-open")).is_ok());
        assert!(validate_appearance(None, None).is_ok());
        assert_matches!(validate_appearance(Some("not a colour"), None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn milestones_get_ids_and_trimmed_titles() {
        let out = normalize_milestones(vec![
            MilestoneInput { id: None, title: " First 10km ".into(), value: Some(10.0), deadline: None },
            MilestoneInput { id: Some("m-2".into()), title: "Half".into(), value: None, deadline: None },
        ])
        .unwrap();
        assert_eq!(out[0].title, "First 10km");
        assert!(uuid::Uuid::parse_str(&out[0].id).is_ok());
        assert_eq!(out[1].id, "m-2");

        let blank = vec![MilestoneInput { id: None, title: " ".into(), value: None, deadline: None }];
        assert_matches!(normalize_milestones(blank), Err(CoreError::Validation(_)));
    }

    #[test]
    fn checklist_toggle_flips_one_item() {
        let mut items = normalize_checklist(vec![
            ChecklistItemInput { id: Some("a".into()), text: "Buy milk".into(), done: false },
            ChecklistItemInput { id: Some("b".into()), text: "Buy eggs".into(), done: true },
        ])
        .unwrap();
        assert!(toggle_checklist_item(&mut items, "a"));
        assert!(items[0].done);
        assert!(items[1].done);
        assert!(!toggle_checklist_item(&mut items, "zzz"));
    }

    #[test]
    fn negative_log_value_is_rejected() {
        assert!(validate_log_value(Some(0.0)).is_ok());
        assert!(validate_log_value(None).is_ok());
        assert_matches!(validate_log_value(Some(-3.0)), Err(CoreError::Validation(_)));
    }
}
