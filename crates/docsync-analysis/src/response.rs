//! Summarizer response parser
//!
//! The summarizer is asked for a JSON object but frequently wraps it in a
//! fenced code block, sometimes with a language label. Only the shape of the
//! answer is checked here, never its truth.

use crate::error::ResponseError;
use docsync_model::Analysis;

const FENCE: &str = "```";

/// Parser for raw summarizer responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Create new response parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract the JSON payload from a response
    ///
    /// If the response contains a fenced block, the content of the *first*
    /// block is returned (without its label); otherwise the whole response.
    /// The result is trimmed. An unterminated fence runs to the end of input.
    #[must_use]
    pub fn extract_payload<'a>(&self, response: &'a str) -> &'a str {
        let Some(start) = response.find(FENCE) else {
            return response.trim();
        };
        let body = strip_label(&response[start + FENCE.len()..]);
        let end = body.find(FENCE).unwrap_or(body.len());
        body[..end].trim()
    }

    /// Parse a response into an analysis
    ///
    /// # Errors
    /// Returns [`ResponseError::Empty`] when the payload is blank and
    /// [`ResponseError::Json`] when it is not an analysis-shaped JSON object.
    pub fn parse(&self, response: &str) -> Result<Analysis, ResponseError> {
        let payload = self.extract_payload(response);
        if payload.is_empty() {
            return Err(ResponseError::Empty);
        }
        Ok(serde_json::from_str(payload)?)
    }

    /// Parse a response, degrading to [`Analysis::parse_failed`] on any failure
    #[must_use]
    pub fn parse_or_sentinel(&self, response: &str) -> Analysis {
        match self.parse(response) {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Failed to parse analysis response: {}", e);
                Analysis::parse_failed()
            }
        }
    }
}

/// Drop a fence label such as `json` that directly follows the opening fence
fn strip_label(after_fence: &str) -> &str {
    let label_len = after_fence
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(after_fence.len());
    if label_len == 0 {
        return after_fence;
    }
    let rest = &after_fence[label_len..];
    if rest.starts_with(char::is_whitespace) || rest.starts_with(['{', '[']) {
        rest
    } else {
        after_fence
    }
}
