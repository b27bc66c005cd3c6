//! Block appender implementation.

use askdoc_blocks::Block;
use tracing::{info, warn};

use super::MAX_BATCH_SIZE;
use super::report::AppendReport;
use crate::service::DocumentService;

/// Delivers blocks to a document in bounded, ordered batches.
pub struct BlockAppender<'a> {
    service: &'a dyn DocumentService,
    batch_size: usize,
}

impl<'a> BlockAppender<'a> {
    /// Create an appender using the service's maximum batch size.
    #[must_use]
    pub fn new(service: &'a dyn DocumentService) -> Self {
        Self {
            service,
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Use a smaller batch size. Clamped to `1..=MAX_BATCH_SIZE`.
    #[must_use]
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Append `blocks` to `document_id`, preserving order.
    ///
    /// Never fails: a failed batch is retried one block per request, and
    /// blocks that still fail are logged and listed in the report.
    pub fn append(&self, document_id: &str, blocks: Vec<Block>) -> AppendReport {
        let mut report = AppendReport::default();

        for (index, batch) in blocks.chunks(self.batch_size).enumerate() {
            let offset = index * self.batch_size;
            report.merge(self.append_batch(document_id, batch), offset);
        }

        info!(
            document_id,
            appended = report.appended,
            failed = report.failed_blocks.len(),
            requests = report.requests,
            "Finished appending blocks"
        );
        report
    }

    fn append_batch(&self, document_id: &str, batch: &[Block]) -> AppendReport {
        let mut report = AppendReport {
            requests: 1,
            ..AppendReport::default()
        };

        match self.service.append_blocks(document_id, batch) {
            Ok(()) => {
                report.appended = batch.len();
                return report;
            }
            Err(err) => {
                warn!(
                    document_id,
                    size = batch.len(),
                    error = %err,
                    "Batch append failed, retrying blocks individually"
                );
                report.failed_batches = 1;
            }
        }

        for (position, block) in batch.iter().enumerate() {
            report.requests += 1;
            match self
                .service
                .append_blocks(document_id, std::slice::from_ref(block))
            {
                Ok(()) => report.appended += 1,
                Err(err) => {
                    warn!(
                        document_id,
                        kind = block.kind(),
                        error = %err,
                        "Block append failed"
                    );
                    report.failed_blocks.push(position);
                }
            }
        }

        report
    }
}
