//! Session-to-document mapping.
//!
//! [`SessionStore`] decides whether a question appends to an existing
//! document or starts a new one. [`MemorySessionStore`] keeps the mapping for
//! the process lifetime; persistent stores implement the same trait.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::PipelineError;

/// Thunk that creates a new document and returns its identifier.
pub type CreateDocument<'a> = &'a mut dyn FnMut() -> Result<String, PipelineError>;

/// Maps session identifiers to document identifiers.
pub trait SessionStore: Send + Sync {
    /// Return the document for `session_id`, calling `create` if there is none.
    ///
    /// Idempotent per identifier: once `create` succeeds, later calls return
    /// the same document. A failed `create` records nothing.
    fn get_or_create(
        &self,
        session_id: &str,
        create: CreateDocument<'_>,
    ) -> Result<String, PipelineError>;

    /// Forget the document for `session_id`, so the next question starts anew.
    fn forget(&self, session_id: &str);
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document currently mapped to `session_id`.
    #[must_use]
    pub fn get(&self, session_id: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_or_create(
        &self,
        session_id: &str,
        create: CreateDocument<'_>,
    ) -> Result<String, PipelineError> {
        // Held across `create` so concurrent first questions share one document.
        let mut documents = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(document_id) = documents.get(session_id) {
            return Ok(document_id.clone());
        }

        let document_id = create()?;
        info!(session_id, document_id = %document_id, "Started session document");
        documents.insert(session_id.to_owned(), document_id.clone());
        Ok(document_id)
    }

    fn forget(&self, session_id: &str) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }
}
