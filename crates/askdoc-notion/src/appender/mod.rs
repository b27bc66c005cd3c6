//! Ordered, batched block delivery.
//!
//! [`BlockAppender`] delivers a parsed block sequence to a document:
//!
//! 1. Split the sequence into batches of at most [`MAX_BATCH_SIZE`] blocks
//! 2. Submit each batch as one request, sequentially
//! 3. If a batch fails, resubmit its blocks one request each
//! 4. Record blocks that still fail in the [`AppendReport`]
//!
//! Delivery is best-effort: failures are logged and counted, never returned
//! as errors.
//!
//! # Example
//!
//! ```no_run
//! use askdoc_blocks::parse_response;
//! use askdoc_notion::{BlockAppender, DatabaseTarget, NotionClient};
//!
//! let client = NotionClient::from_config(
//!     "https://api.notion.com/v1",
//!     "secret_token",
//!     "2022-06-28",
//!     DatabaseTarget {
//!         database_id: "db".to_owned(),
//!         title_property: "Name".to_owned(),
//!         date_property: None,
//!     },
//! );
//! let report = BlockAppender::new(&client).append("page-id", parse_response("# Hi"));
//! assert!(report.is_complete());
//! ```

mod executor;
mod report;

pub use executor::BlockAppender;
pub use report::AppendReport;

/// Maximum number of children the service accepts per append request.
pub const MAX_BATCH_SIZE: usize = 100;
