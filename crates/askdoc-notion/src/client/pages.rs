//! Page operations.

use chrono::Local;
use tracing::info;

use super::{NotionClient, check_status};
use crate::error::NotionError;
use crate::types::{CreatePageRequest, Page};

impl NotionClient {
    /// Create a page in the target database, titled `title` and dated today.
    pub fn create_page(&self, title: &str) -> Result<Page, NotionError> {
        let url = format!("{}/pages", self.base_url);
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let request = CreatePageRequest::new(&self.target, title, today);

        info!(database_id = %self.target.database_id, "Creating page");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header("Notion-Version", &self.api_version)
            .header("Accept", "application/json")
            .send_json(&request)?;

        let page: Page = check_status(response)?.read_json()?;
        if page.id.is_empty() {
            return Err(NotionError::MissingField("id"));
        }
        info!(
            page_id = %page.id,
            url = page.url.as_deref().unwrap_or_default(),
            "Created page"
        );
        Ok(page)
    }
}
