//! API key check.
//!
//! When an API key is configured, requests must carry it in the `x-api-key`
//! header.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ServerError;
use crate::state::AppState;

/// Header carrying the client's API key.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests without the configured API key.
pub(crate) async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(expected) = state.api_key.as_deref()
        && !key_matches(request.headers(), expected)
    {
        tracing::warn!(path = %request.uri().path(), "Rejected request with bad API key");
        return Err(ServerError::Unauthorized);
    }
    Ok(next.run(request).await)
}

fn key_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|provided| provided == expected)
}
