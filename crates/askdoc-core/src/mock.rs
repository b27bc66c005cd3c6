//! In-memory services for testing.
//!
//! Provides [`MockCompletion`] and [`MockDocuments`] so the pipeline and its
//! callers can be exercised without network access.

use std::sync::{Mutex, PoisonError};

use askdoc_blocks::Block;
use askdoc_completion::{CompletionError, CompletionService};
use askdoc_notion::{DocumentService, NotionError};

/// Completion service returning a fixed answer or a fixed HTTP failure.
#[derive(Debug)]
pub struct MockCompletion {
    answer: Result<String, u16>,
    questions: Mutex<Vec<String>>,
}

impl MockCompletion {
    /// Answer every question with `answer`.
    #[must_use]
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_owned()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Fail every question with HTTP `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            answer: Err(status),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions received so far.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CompletionService for MockCompletion {
    fn complete(&self, question: &str) -> Result<String, CompletionError> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(question.to_owned());
        self.answer
            .clone()
            .map_err(|status| CompletionError::HttpResponse {
                status,
                body: "mock failure".to_owned(),
            })
    }
}

/// Document service recording created titles and appended blocks.
///
/// Documents are named `page-1`, `page-2`, ... in creation order.
#[derive(Debug, Default)]
pub struct MockDocuments {
    fail_create: bool,
    fail_appends: bool,
    titles: Mutex<Vec<String>>,
    appended: Mutex<Vec<(String, Block)>>,
}

impl MockDocuments {
    /// Create a mock where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make document creation fail with HTTP 401.
    #[must_use]
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make every append request fail with HTTP 500.
    #[must_use]
    pub fn failing_appends(mut self) -> Self {
        self.fail_appends = true;
        self
    }

    /// Titles of created documents.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.titles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Appended `(document_id, block)` pairs in arrival order.
    #[must_use]
    pub fn appended(&self) -> Vec<(String, Block)> {
        self.appended
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Kinds of appended blocks in arrival order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        self.appended()
            .iter()
            .map(|(_, block)| block.kind())
            .collect()
    }
}

impl DocumentService for MockDocuments {
    fn create_document(&self, title: &str) -> Result<String, NotionError> {
        if self.fail_create {
            return Err(NotionError::HttpResponse {
                status: 401,
                body: "unauthorized".to_owned(),
            });
        }
        let mut titles = self.titles.lock().unwrap_or_else(PoisonError::into_inner);
        titles.push(title.to_owned());
        Ok(format!("page-{}", titles.len()))
    }

    fn append_blocks(&self, document_id: &str, blocks: &[Block]) -> Result<(), NotionError> {
        if self.fail_appends {
            return Err(NotionError::HttpResponse {
                status: 500,
                body: "internal error".to_owned(),
            });
        }
        self.appended
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(
                blocks
                    .iter()
                    .map(|block| (document_id.to_owned(), block.clone())),
            );
        Ok(())
    }
}
