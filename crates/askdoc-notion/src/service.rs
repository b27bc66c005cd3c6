//! Document service abstraction.
//!
//! [`DocumentService`] is the seam between the appender/pipeline and the
//! remote page-database, so both can be exercised without network access.

use askdoc_blocks::Block;

use crate::client::NotionClient;
use crate::error::NotionError;

/// Remote document store that holds conversation pages.
pub trait DocumentService: Send + Sync {
    /// Create a new document titled `title` and return its identifier.
    fn create_document(&self, title: &str) -> Result<String, NotionError>;

    /// Append one batch of at most [`crate::MAX_BATCH_SIZE`] blocks, in order.
    fn append_blocks(&self, document_id: &str, blocks: &[Block]) -> Result<(), NotionError>;
}

impl DocumentService for NotionClient {
    fn create_document(&self, title: &str) -> Result<String, NotionError> {
        Ok(self.create_page(title)?.id)
    }

    fn append_blocks(&self, document_id: &str, blocks: &[Block]) -> Result<(), NotionError> {
        self.append_children(document_id, blocks)
    }
}
