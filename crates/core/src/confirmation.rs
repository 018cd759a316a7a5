//! Typed confirmation guarding destructive actions.

use crate::error::CoreError;

/// The literal a user must type before anything is deleted.
pub const DELETE_CONFIRMATION: &str = "DELETAR";

/// Succeeds only on an exact, case-sensitive match. Surrounding whitespace
/// is not forgiven.
pub fn verify_confirmation(typed: Option<&str>) -> Result<(), CoreError> {
    match typed {
        Some(DELETE_CONFIRMATION) => Ok(()),
        _ => Err(CoreError::ConfirmationMismatch {
            expected: DELETE_CONFIRMATION,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn exact_literal_passes() {
        assert!(verify_confirmation(Some("DELETAR")).is_ok());
    }

    #[test]
    fn anything_else_fails() {
        for typed in ["deletar", "DELETAR ", " DELETAR", "DELETE", ""] {
            assert_matches!(
                verify_confirmation(Some(typed)),
                Err(CoreError::ConfirmationMismatch { .. }),
                "{typed:?} must not confirm"
            );
        }
        assert!(verify_confirmation(None).is_err());
    }
}
