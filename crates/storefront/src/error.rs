//! Unified error handling with Sentry integration.
//!
//! Route handlers that can fail in ways the page itself does not absorb
//! return `Result<T, AppError>`. Connectivity and session faults are
//! captured to Sentry before responding; backend-supplied messages pass
//! through to the client verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture faults that are ours (or the wire's) to Sentry; backend
        // rejections are ordinary user-visible outcomes.
        if !matches!(self, Self::Api(ApiError::Backend { .. })) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = match &self {
            Self::Api(ApiError::Backend { status, message }) => {
                // Preserve the backend's status where it is a valid axum
                // status, and its message always.
                let status = StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, message.clone())
            }
            Self::Api(ApiError::Network(_) | ApiError::Parse(_)) => (
                StatusCode::BAD_GATEWAY,
                "Could not reach the commerce backend".to_string(),
            ),
            Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_backend_error_keeps_status() {
        let err = AppError::Api(ApiError::Backend {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Password is incorrect".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_error_maps_to_bad_gateway() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::Api(ApiError::Parse(parse_err));
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }
}
