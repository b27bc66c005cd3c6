//! Append outcome.

/// Outcome of delivering a block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendReport {
    /// Number of append requests issued (batches plus per-block retries).
    pub requests: usize,
    /// Number of batches that failed and were retried block by block.
    pub failed_batches: usize,
    /// Number of blocks persisted.
    pub appended: usize,
    /// Positions (in the input sequence) of blocks that could not be persisted.
    pub failed_blocks: Vec<usize>,
}

impl AppendReport {
    /// Whether every block was persisted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_blocks.is_empty()
    }

    /// Fold another report into this one, offsetting its block positions.
    pub fn merge(&mut self, other: AppendReport, offset: usize) {
        self.requests += other.requests;
        self.failed_batches += other.failed_batches;
        self.appended += other.appended;
        self.failed_blocks
            .extend(other.failed_blocks.into_iter().map(|i| i + offset));
    }
}
