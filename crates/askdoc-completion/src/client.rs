//! Chat completions REST client.

use std::time::Duration;

use tracing::info;
use ureq::Agent;

use crate::error::CompletionError;
use crate::service::CompletionService;
use crate::types::{ChatRequest, ChatResponse};

/// Completions can take a while for long answers.
const DEFAULT_TIMEOUT: u64 = 120;

/// Chat completions API client.
pub struct OpenAiClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g. `https://api.openai.com/v1`)
    /// * `api_key` - Secret API key
    /// * `model` - Model name sent with every request
    #[must_use]
    pub fn from_config(base_url: &str, api_key: &str, model: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        }
    }

    /// Model used for completions.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionService for OpenAiClient {
    fn complete(&self, question: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        info!(model = %self.model, "Requesting completion");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send_json(&ChatRequest::user(&self.model, question))?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(CompletionError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let response: ChatResponse = body_reader.read_json()?;
        response.into_answer().ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_normalizes_base_url() {
        let client = OpenAiClient::from_config("https://api.example.com/v1/", "key", "gpt-4o");

        assert_eq!(client.base_url, "https://api.example.com/v1");
        assert_eq!(client.model(), "gpt-4o");
    }
}
