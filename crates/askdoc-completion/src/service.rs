//! Completion service abstraction.

use crate::error::CompletionError;

/// Answers a question with model-generated text.
pub trait CompletionService: Send + Sync {
    /// Return the answer to `question`, trimmed of surrounding whitespace.
    fn complete(&self, question: &str) -> Result<String, CompletionError>;
}
