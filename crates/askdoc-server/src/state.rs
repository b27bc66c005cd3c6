//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use askdoc_core::Conversation;
use tokio::sync::Mutex;

use crate::Services;

/// Application state shared across all handlers.
pub struct AppState {
    /// Pipeline collaborators.
    services: Services,
    /// Required `x-api-key` value (`None` disables the check).
    pub(crate) api_key: Option<String>,
    /// Application version reported by `/health`.
    pub(crate) version: String,
    /// Serializes question processing. The owned guard lives in the blocking
    /// task, so a dropped request still holds it until its work finishes.
    pub(crate) gate: Arc<Mutex<()>>,
}

impl AppState {
    /// Create state over `services`.
    #[must_use]
    pub fn new(services: Services, api_key: Option<String>, version: String) -> Self {
        Self {
            services,
            api_key: api_key.filter(|key| !key.is_empty()),
            version,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Conversation over the shared services.
    pub(crate) fn conversation(&self) -> Conversation<'_> {
        Conversation::new(
            self.services.completion.as_ref(),
            self.services.documents.as_ref(),
            self.services.sessions.as_ref(),
        )
        .options(self.services.record.clone())
    }
}
