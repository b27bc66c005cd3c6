//! Error types for the completion client.

/// Error from completion API operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (authentication, rate limit, server error).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The response contained no choices.
    #[error("completion response contained no message")]
    EmptyResponse,
}
