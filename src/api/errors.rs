use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Body sent for every 500, whatever the underlying cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API-specific error wrapper that converts AppError into HTTP responses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": msg }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": msg }),
            ),
            AppError::Validation { message, detail } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": message, "error": detail }),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                serde_json::json!({ "message": msg }),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Request failed with internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": INTERNAL_ERROR_MESSAGE }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
///
/// The panic payload is logged but never echoed to the client.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
