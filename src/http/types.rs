use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Structured body carried by every 4xx/5xx response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    /// The kind of the error.
    pub error_code: i32,
    /// Correlation id to quote when asking for support.
    pub trace_id: Uuid,
    /// Friendly message that can be shown on a user interface.
    pub error_message: String,
}

/// Everything a handler can fail with. Conversion to the wire happens here
/// and nowhere else; the error codes and messages are part of the public
/// contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("payload failed validation")]
    InvalidPayload,
    #[error("no task matches the requested id")]
    NotFound,
    #[error("no task matches the id being written")]
    WriteMissing,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::WriteMissing => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> i32 {
        match self {
            ApiError::NotFound => -1,
            ApiError::InvalidPayload => -2,
            ApiError::WriteMissing => -3,
            ApiError::Internal(_) => 0,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidPayload => "Payload is invalid",
            ApiError::NotFound => "Cannot found",
            ApiError::WriteMissing => "Trying to write inexisting item",
            ApiError::Internal(_) => "An unexpected error occurred",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4();
        match &self {
            ApiError::Internal(err) => {
                tracing::error!(%trace_id, error = %err, "request failed");
            }
            rejected => {
                tracing::debug!(%trace_id, code = rejected.error_code(), "request rejected");
            }
        }
        let body = ProblemDetail {
            error_code: self.error_code(),
            trace_id,
            error_message: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
