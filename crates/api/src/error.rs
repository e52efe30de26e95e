use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mondaysync_core::error::CoreError;
use mondaysync_monday::MondayApiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Only authentication failures and upstream/database failures reach this
/// type; expected no-op cases are answered with a `skipped` success body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mondaysync_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The monday.com API call failed.
    #[error("monday.com API error: {0}")]
    Monday(#[from] MondayApiError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::Monday(err) => {
                tracing::error!(error = %err, "monday.com API error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Failed to fetch item from monday.com".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
            "detail": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
