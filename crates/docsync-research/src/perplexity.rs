//! Search service client (chat-completions style API with citations)

use crate::error::check_status;
use crate::summarize::Summarizer;
use crate::{prompts, ClientError};
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

const SERVICE: &str = "Perplexity";

/// Default chat-completions endpoint
pub const ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
/// Online model used for both search and summarization
pub const MODEL: &str = "llama-3.1-sonar-small-128k-online";

/// Per-call timeout for searches
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Per-call timeout for summarization
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

/// One search answer
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Answer text
    pub content: String,
    /// Source URLs
    pub citations: Vec<String>,
    /// Full response body, kept for debugging
    pub raw: Value,
}

impl SearchResponse {
    /// Extract answer and citations from a response body
    #[must_use]
    pub fn from_body(raw: Value) -> Self {
        let content = raw
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let citations = raw
            .get("citations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            content,
            citations,
            raw,
        }
    }
}

/// A web search backend
pub trait SearchApi {
    /// Search the recent web for `query`
    ///
    /// # Errors
    /// Returns an error if the call fails.
    fn search(&self, query: &str) -> Result<SearchResponse, ClientError>;
}

impl<T: SearchApi + ?Sized> SearchApi for &T {
    fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        (**self).search(query)
    }
}

/// Blocking client for the search service
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    http: Client,
    api_key: String,
    endpoint: String,
    recency: String,
}

impl PerplexityClient {
    /// Create client with `api_key`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().build()?,
            api_key: api_key.into(),
            endpoint: ENDPOINT.to_string(),
            recency: "week".to_string(),
        })
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the recency filter (`day`, `week`, `month`, `year`)
    #[must_use]
    pub fn with_recency(mut self, recency: impl Into<String>) -> Self {
        self.recency = recency.into();
        self
    }

    fn post(&self, body: &Value, timeout: Duration) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(body)
            .send()?;
        Ok(check_status(SERVICE, response)?.json()?)
    }

    fn search_body(&self, query: &str) -> Value {
        json!({
            "model": MODEL,
            "messages": [
                {"role": "system", "content": prompts::SEARCH_SYSTEM},
                {"role": "user", "content": prompts::search(query)}
            ],
            "temperature": 0.2,
            "max_tokens": 1000,
            "return_citations": true,
            "search_recency_filter": self.recency,
        })
    }

    fn analysis_body(content: &str) -> Value {
        json!({
            "model": MODEL,
            "messages": [
                {"role": "system", "content": prompts::ANALYST_SYSTEM},
                {"role": "user", "content": prompts::analysis(content, prompts::SEARCH_CONTENT_CHARS)}
            ],
            "temperature": 0.1,
            "max_tokens": 2000,
        })
    }
}

impl SearchApi for PerplexityClient {
    fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        let raw = self.post(&self.search_body(query), SEARCH_TIMEOUT)?;
        Ok(SearchResponse::from_body(raw))
    }
}

impl Summarizer for PerplexityClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn summarize(&self, content: &str) -> Result<String, ClientError> {
        let raw = self.post(&Self::analysis_body(content), ANALYSIS_TIMEOUT)?;
        let text = SearchResponse::from_body(raw).content;
        if text.is_empty() {
            return Err(ClientError::EmptyResponse(SERVICE));
        }
        Ok(text)
    }
}
