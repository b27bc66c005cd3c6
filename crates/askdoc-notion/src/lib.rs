//! Page-database integration for askdoc.
//!
//! - [`NotionClient`]: sync HTTP client for page creation and block append
//! - [`DocumentService`]: the trait the rest of askdoc talks to
//! - [`BlockAppender`]: batched, order-preserving, best-effort delivery

mod appender;
mod client;
mod error;
mod service;
mod types;

pub use appender::{AppendReport, BlockAppender, MAX_BATCH_SIZE};
pub use client::NotionClient;
pub use error::NotionError;
pub use service::DocumentService;
pub use types::{DatabaseTarget, Page};
