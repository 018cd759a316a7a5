//! Progress percentages for quantitative and boolean entities.

/// `current / target * 100`, clamped to `[0, 100]`.
///
/// Returns 0 when there is no target (or a non-positive one) and when
/// nothing has been recorded yet.
pub fn quantity_progress(current: Option<f64>, target: Option<f64>) -> f64 {
    let (Some(current), Some(target)) = (current, target) else {
        return 0.0;
    };
    if target.is_nan() || target <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

/// Progress of a habit for one day.
///
/// Without a target the habit is boolean: 100 when the day's log is
/// completed, 0 otherwise. With a target the logged value drives it.
pub fn habit_progress(target: Option<f64>, log_completed: bool, log_value: Option<f64>) -> f64 {
    match target {
        None => {
            if log_completed {
                100.0
            } else {
                0.0
            }
        }
        Some(target) => quantity_progress(log_value, Some(target)),
    }
}

/// Whether a habit counts as done for the day.
pub fn habit_done(target: Option<f64>, log_completed: bool, log_value: Option<f64>) -> bool {
    log_completed || habit_progress(target, log_completed, log_value) >= 100.0
}

/// Progress of a goal; goals without a target report 0.
pub fn goal_progress(progress_value: f64, target_value: Option<f64>) -> f64 {
    quantity_progress(Some(progress_value), target_value)
}
