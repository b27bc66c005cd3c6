//! Pipeline error types.

use askdoc_completion::CompletionError;
use askdoc_notion::NotionError;

/// Hard failure of a question/answer cycle.
///
/// Partial block persistence is not an error; see
/// [`askdoc_notion::AppendReport`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The question was empty after trimming.
    #[error("question is empty")]
    EmptyQuestion,

    /// Document creation failed.
    #[error("document service error: {0}")]
    Document(#[from] NotionError),

    /// Completion call failed.
    #[error("completion service error: {0}")]
    Completion(#[from] CompletionError),
}
