//! Question/answer recording pipeline for askdoc.
//!
//! Composes the completion service, the document service and a
//! [`SessionStore`] into a single [`Conversation::ask`] call. The services are
//! injected as trait objects so the same pipeline serves the HTTP server, the
//! interactive CLI and tests.

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod pipeline;
mod session;

pub use error::PipelineError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCompletion, MockDocuments};
pub use pipeline::{Answer, Conversation, Question, RecordOptions};
pub use session::{CreateDocument, MemorySessionStore, SessionStore};
