//! Question/answer recording pipeline.
//!
//! [`Conversation::ask`] runs one cycle start to finish:
//!
//! 1. Resolve the session's document, creating a page titled by the question
//! 2. Record the question as a callout block
//! 3. Ask the completion service
//! 4. Parse the answer into blocks and append them
//!
//! Document creation and completion failures abort the cycle. Block append
//! failures are logged and reported in [`Answer`] but never abort it.

use askdoc_blocks::{factory, parse_response};
use askdoc_completion::CompletionService;
use askdoc_notion::{AppendReport, BlockAppender, DocumentService};
use tracing::info;

use crate::error::PipelineError;
use crate::session::SessionStore;

/// A question submitted by a caller.
#[derive(Debug, Clone)]
pub struct Question {
    /// Question text.
    pub text: String,
    /// Session the question belongs to.
    pub session_id: String,
    /// Keep the session's document for later questions.
    pub keep_going: bool,
    /// Label shown before the question in the recorded callout.
    pub user_display: Option<String>,
}

impl Question {
    /// Question in `session_id` that keeps the session open.
    #[must_use]
    pub fn new(text: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            session_id: session_id.into(),
            keep_going: true,
            user_display: None,
        }
    }
}

/// Result of a successful cycle.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Model answer, trimmed.
    pub answer: String,
    /// Document the exchange was recorded in.
    pub document_id: String,
    /// Delivery of the question callout.
    pub question_report: AppendReport,
    /// Delivery of the answer blocks.
    pub answer_report: AppendReport,
}

impl Answer {
    /// Whether every block of the exchange was persisted.
    #[must_use]
    pub fn fully_recorded(&self) -> bool {
        self.question_report.is_complete() && self.answer_report.is_complete()
    }
}

/// Recording options.
#[derive(Debug, Clone)]
pub struct RecordOptions {
    /// Emoji on the question callout.
    pub question_emoji: String,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            question_emoji: factory::DEFAULT_CALLOUT_EMOJI.to_owned(),
        }
    }
}

/// Composes the collaborators of one question/answer cycle.
pub struct Conversation<'a> {
    completion: &'a dyn CompletionService,
    documents: &'a dyn DocumentService,
    sessions: &'a dyn SessionStore,
    options: RecordOptions,
}

impl<'a> Conversation<'a> {
    /// Create a conversation over the given services.
    #[must_use]
    pub fn new(
        completion: &'a dyn CompletionService,
        documents: &'a dyn DocumentService,
        sessions: &'a dyn SessionStore,
    ) -> Self {
        Self {
            completion,
            documents,
            sessions,
            options: RecordOptions::default(),
        }
    }

    /// Set recording options.
    #[must_use]
    pub fn options(mut self, options: RecordOptions) -> Self {
        self.options = options;
        self
    }

    /// Answer `question` and record the exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the question is empty
    /// - the session document cannot be created
    /// - the completion service fails
    pub fn ask(&self, question: &Question) -> Result<Answer, PipelineError> {
        let text = question.text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyQuestion);
        }

        let result = self.answer_and_record(question, text);

        // A finished session is closed even when the cycle failed.
        if !question.keep_going {
            self.sessions.forget(&question.session_id);
        }

        result
    }

    fn answer_and_record(&self, question: &Question, text: &str) -> Result<Answer, PipelineError> {
        let document_id = self
            .sessions
            .get_or_create(&question.session_id, &mut || {
                self.documents
                    .create_document(text)
                    .map_err(PipelineError::from)
            })?;

        let appender = BlockAppender::new(self.documents);

        let callout_text = match question.user_display.as_deref() {
            Some(label) if !label.trim().is_empty() => format!("{}: {text}", label.trim()),
            _ => text.to_owned(),
        };
        let question_report = appender.append(
            &document_id,
            vec![factory::callout(&callout_text, &self.options.question_emoji)],
        );

        let answer = self.completion.complete(text)?;
        let answer = answer.trim().to_owned();

        let blocks = parse_response(&answer);
        info!(
            session_id = %question.session_id,
            blocks = blocks.len(),
            "Recording answer"
        );
        let answer_report = appender.append(&document_id, blocks);

        Ok(Answer {
            answer,
            document_id,
            question_report,
            answer_report,
        })
    }
}
