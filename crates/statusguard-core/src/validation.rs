//! # Validation Module
//!
//! Submission checks that run before the guard.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum)                                        │
//! │  └── Form / JSON deserialization                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Something to record? (comment or status change)                   │
//! │  └── Status code format when assigning statuses                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Guard (state/status membership)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database constraints                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};

/// Maximum length of a status code.
pub const MAX_STATUS_CODE_LEN: usize = 32;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects a submission that would record nothing.
///
/// The check looks at the raw comment, before sanitizing: a comment of only
/// whitespace or markup passes here and is stored empty.
///
/// ## Example
/// ```rust
/// use statusguard_core::validation::ensure_comment_or_status_change;
///
/// assert!(ensure_comment_or_status_change(Some("Called customer"), "processing", "processing").is_ok());
/// assert!(ensure_comment_or_status_change(None, "fraud", "processing").is_ok());
/// assert!(ensure_comment_or_status_change(Some(""), "processing", "processing").is_err());
/// ```
pub fn ensure_comment_or_status_change(
    comment: Option<&str>,
    requested_status: &str,
    current_status: &str,
) -> CoreResult<()> {
    let comment_empty = comment.map_or(true, str::is_empty);
    if comment_empty && requested_status == current_status {
        return Err(CoreError::MissingCommentOrStatus);
    }
    Ok(())
}

/// Validates a status code.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Lowercase ASCII letters, digits and underscores, starting with a letter
///
/// ## Example
/// ```rust
/// use statusguard_core::validation::validate_status_code;
///
/// assert!(validate_status_code("pending_shipment").is_ok());
/// assert!(validate_status_code("Pending Shipment").is_err());
/// ```
pub fn validate_status_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "status".to_string(),
        });
    }

    if code.len() > MAX_STATUS_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "status".to_string(),
            max: MAX_STATUS_CODE_LEN,
        });
    }

    let starts_with_letter = code.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_chars = code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !starts_with_letter || !valid_chars {
        return Err(ValidationError::InvalidFormat {
            field: "status".to_string(),
            reason: "use lowercase letters (a-z), numbers (0-9) or underscore, starting with a letter"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_comment_and_unchanged_status_rejected() {
        let err = ensure_comment_or_status_change(None, "pending", "pending").unwrap_err();
        assert!(matches!(err, CoreError::MissingCommentOrStatus));
        assert!(ensure_comment_or_status_change(Some(""), "pending", "pending").is_err());
    }

    #[test]
    fn test_comment_or_change_accepted() {
        assert!(ensure_comment_or_status_change(Some("note"), "pending", "pending").is_ok());
        assert!(ensure_comment_or_status_change(None, "holded", "pending").is_ok());
        // Whitespace is not empty before sanitizing.
        assert!(ensure_comment_or_status_change(Some("  "), "pending", "pending").is_ok());
    }

    #[test]
    fn test_validate_status_code() {
        assert!(validate_status_code("processing").is_ok());
        assert!(validate_status_code("pending_shipment2").is_ok());

        assert!(validate_status_code("").is_err());
        assert!(validate_status_code("2fast").is_err());
        assert!(validate_status_code("has space").is_err());
        assert!(validate_status_code("UPPER").is_err());
        assert!(validate_status_code(&"a".repeat(33)).is_err());
    }
}
