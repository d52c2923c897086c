use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified handler error type.
///
/// Non-essential upstream failures never become one of these; handlers
/// degrade them to empty/default values and log. Only failures of the
/// requested resource itself surface here.
#[derive(Debug, Error)]
pub enum AppError {
    /// The resolved entity is absent upstream.
    #[error("{0}")]
    NotFound(String),

    /// The metadata provider reported a structured error list; passed to
    /// the client verbatim with a 400.
    #[error("upstream reported errors")]
    Upstream(serde_json::Value),

    /// Anything unexpected; details are logged, the client gets a generic
    /// per-endpoint message.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),
            AppError::Upstream(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "errors": errors })),
            )
                .into_response(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "handler failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": msg })),
                )
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
