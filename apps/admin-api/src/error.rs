//! Error types for the Admin API.
//!
//! `ApiError` renders in the REST shape (`{"message": "..."}` with a 4xx/5xx
//! status). The interactive admin action renders its own
//! `{"error": true, "message": ...}` body through [`ApiError::admin_message`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use statusguard_core::CoreError;
use statusguard_db::DbError;
use tracing::error;

/// Generic message shown to admins for unexpected failures.
pub const ADMIN_GENERIC_ERROR: &str = "We cannot add order history.";

/// Generic message returned by REST endpoints for unexpected failures.
pub const REST_GENERIC_ERROR: &str = "Internal Error. Details are available in the server log.";

/// Admin API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("The consumer isn't authorized to access {0}.")]
    Forbidden(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Whether the error's own message may be shown to the caller.
    pub fn is_user_facing(&self) -> bool {
        match self {
            ApiError::Core(e) => e.is_user_facing() || matches!(e, CoreError::OrderNotFound(_)),
            ApiError::Database(e) => e.is_not_found(),
            ApiError::AuthFailed(_) | ApiError::Forbidden(_) | ApiError::InvalidRequest(_) => true,
            ApiError::Internal(_) => false,
        }
    }

    /// Message for the interactive admin action.
    pub fn admin_message(&self) -> String {
        match self {
            ApiError::Core(e) if e.is_user_facing() => e.to_string(),
            _ => ADMIN_GENERIC_ERROR.to_string(),
        }
    }

    /// HTTP status for REST responses.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::OrderNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(e) if e.is_user_facing() => StatusCode::BAD_REQUEST,
            ApiError::Database(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_user_facing() {
            self.to_string()
        } else {
            error!(error = %self, "Request failed");
            REST_GENERIC_ERROR.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_reach_admin() {
        let err = ApiError::from(CoreError::MissingCommentOrStatus);
        assert_eq!(
            err.admin_message(),
            "Please provide a comment text or update the order status to be able to submit a comment for this order."
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unexpected_errors_are_generic_for_admin() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.admin_message(), ADMIN_GENERIC_ERROR);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            ApiError::from(DbError::not_found("Order", 7)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::OrderNotFound(7)).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_status_not_in_state_is_400() {
        let err = ApiError::from(CoreError::StatusNotInState {
            status: "complete".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Unable to add comment: The status \"complete\" is not part of the order status history."
        );
    }
}
