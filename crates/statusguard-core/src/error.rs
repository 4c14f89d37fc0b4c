//! # Error Types
//!
//! Domain-specific error types for statusguard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  statusguard-core errors (this file)                                   │
//! │  ├── CoreError        - Guard and submission rule violations           │
//! │  └── ValidationError  - Input format failures                          │
//! │                                                                         │
//! │  statusguard-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  admin-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP callers see                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages of user-facing variants are shown to admins verbatim, so their
//! wording is part of the contract.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order cannot be found.
    #[error("The entity that was requested doesn't exist: order {0}")]
    OrderNotFound(i64),

    /// The requested status is not registered under the order's current state.
    ///
    /// ## When This Occurs
    /// Only on the programmatic comment path, with the override flag off:
    /// ```text
    /// order.state = processing        statuses(processing) = {processing, fraud}
    ///      │
    ///      ▼
    /// add_comment(status: "complete")
    ///      │
    ///      ▼
    /// StatusNotInState { status: "complete" }
    /// ```
    /// The interactive admin action never raises this; it keeps the
    /// existing status instead.
    #[error("Unable to add comment: The status \"{status}\" is not part of the order status history.")]
    StatusNotInState { status: String },

    /// Comment is empty and the status is unchanged, so there is nothing to
    /// record.
    #[error("Please provide a comment text or update the order status to be able to submit a comment for this order.")]
    MissingCommentOrStatus,

    /// A stored or submitted state code is not one of the known states.
    #[error("Unknown order state: {0}")]
    UnknownState(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether the message is meant for the admin as-is.
    ///
    /// Everything else is reported generically and logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CoreError::StatusNotInState { .. }
                | CoreError::MissingCommentOrStatus
                | CoreError::Validation(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_not_in_state_names_the_status() {
        let err = CoreError::StatusNotInState {
            status: "complete".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to add comment: The status \"complete\" is not part of the order status history."
        );
    }

    #[test]
    fn test_missing_comment_message() {
        assert_eq!(
            CoreError::MissingCommentOrStatus.to_string(),
            "Please provide a comment text or update the order status to be able to submit a comment for this order."
        );
    }

    #[test]
    fn test_user_facing_split() {
        assert!(CoreError::MissingCommentOrStatus.is_user_facing());
        assert!(CoreError::StatusNotInState {
            status: "x".to_string()
        }
        .is_user_facing());
        assert!(!CoreError::OrderNotFound(7).is_user_facing());
        assert!(!CoreError::UnknownState("bogus".to_string()).is_user_facing());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "status".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
