//! Messages API summarizer

use crate::error::check_status;
use crate::summarize::Summarizer;
use crate::{prompts, ClientError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const SERVICE: &str = "Anthropic";

/// Default messages endpoint
pub const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
/// Model used for summarization
pub const MODEL: &str = "claude-3-haiku-20240307";
/// API version header value
pub const API_VERSION: &str = "2023-06-01";
/// Per-call timeout
pub const TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Blocking messages API client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl AnthropicClient {
    /// Create client with `api_key`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().timeout(TIMEOUT).build()?,
            api_key: api_key.into(),
            endpoint: ENDPOINT.to_string(),
            model: MODEL.to_string(),
        })
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Model in use
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn body(&self, content: &str) -> Value {
        json!({
            "model": self.model,
            "max_tokens": 2000,
            "messages": [
                {"role": "user", "content": prompts::analysis(content, prompts::MESSAGES_CONTENT_CHARS)}
            ]
        })
    }
}

impl Summarizer for AnthropicClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn summarize(&self, content: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.body(content))
            .send()?;
        let parsed: MessagesResponse = check_status(SERVICE, response)?.json()?;
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .filter(|text| !text.is_empty())
            .ok_or(ClientError::EmptyResponse(SERVICE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client() {
        let client = AnthropicClient::new("test-key").unwrap();
        assert_eq!(client.model(), MODEL);
        assert_eq!(client.name(), "Anthropic");
    }

    #[test]
    fn body_truncates_to_budget() {
        let client = AnthropicClient::new("k").unwrap().with_model("claude-test");
        let content = "y".repeat(prompts::MESSAGES_CONTENT_CHARS * 2);
        let body = client.body(&content);
        assert_eq!(body["model"], "claude-test");
        let prompt = body["messages"][0]["content"].as_str().unwrap();
        assert!(!prompt.contains(&"y".repeat(prompts::MESSAGES_CONTENT_CHARS + 1)));
    }
}
