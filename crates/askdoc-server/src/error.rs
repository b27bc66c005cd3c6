//! Error types for the HTTP server.

use askdoc_core::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or wrong `x-api-key` header.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Question/answer pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Unexpected failure, such as a panicked worker.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::Pipeline(PipelineError::EmptyQuestion) => {
                StatusCode::BAD_REQUEST
            }
            Self::Pipeline(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}
