//! Page-database REST API client.
//!
//! Sync HTTP client authenticated with an integration bearer token.

mod blocks;
mod pages;

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::NotionError;
use crate::types::DatabaseTarget;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Page-database REST API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    api_version: String,
    target: DatabaseTarget,
}

impl NotionClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g. `https://api.notion.com/v1`)
    /// * `api_key` - Integration token
    /// * `api_version` - Value of the `Notion-Version` header
    /// * `target` - Database new pages are created in
    #[must_use]
    pub fn from_config(
        base_url: &str,
        api_key: &str,
        api_version: &str,
        target: DatabaseTarget,
    ) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            api_version: api_version.to_owned(),
            target,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

/// Turn an error status into [`NotionError::HttpResponse`].
fn check_status(response: Response<ureq::Body>) -> Result<ureq::Body, NotionError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(NotionError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body)
}
