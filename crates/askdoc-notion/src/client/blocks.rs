//! Block children operations.

use askdoc_blocks::Block;
use tracing::info;

use super::{NotionClient, check_status};
use crate::error::NotionError;
use crate::types::AppendChildrenRequest;

impl NotionClient {
    /// Append `blocks` as children of `block_id`, in order, in one request.
    pub fn append_children(&self, block_id: &str, blocks: &[Block]) -> Result<(), NotionError> {
        let url = format!("{}/blocks/{}/children", self.base_url, block_id);

        info!("Appending {} blocks to {}", blocks.len(), block_id);

        let response = self
            .agent
            .patch(&url)
            .header("Authorization", &self.auth_header())
            .header("Notion-Version", &self.api_version)
            .header("Accept", "application/json")
            .send_json(&AppendChildrenRequest { children: blocks })?;

        check_status(response)?;
        Ok(())
    }
}
