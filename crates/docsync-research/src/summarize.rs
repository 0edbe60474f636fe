//! Summarizer abstraction and fallback chain

use crate::ClientError;

/// Response used when no summarizer is configured or every one failed
pub const NO_API_RESPONSE: &str = r#"{"summary": "No API available", "updates": [], "no_updates": true}"#;

/// A service that turns collected findings into an analysis response
pub trait Summarizer {
    /// Service name for logs
    fn name(&self) -> &'static str;

    /// Raw response text for `content`
    ///
    /// # Errors
    /// Returns an error if the call fails or yields no text.
    fn summarize(&self, content: &str) -> Result<String, ClientError>;
}

/// Try each summarizer in order; the first non-empty response wins
///
/// Falls back to [`NO_API_RESPONSE`] so the caller always has something to
/// parse.
#[must_use]
pub fn summarize_with_fallback(chain: &[&dyn Summarizer], content: &str) -> String {
    for summarizer in chain {
        tracing::info!("Analyzing with {}", summarizer.name());
        match summarizer.summarize(content) {
            Ok(text) if !text.trim().is_empty() => return text,
            Ok(_) => tracing::warn!("{} returned no text", summarizer.name()),
            Err(e) => tracing::error!("{} analysis failed: {}", summarizer.name(), e),
        }
    }
    tracing::error!("No API available for analysis");
    NO_API_RESPONSE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Option<&'static str>);

    impl Summarizer for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn summarize(&self, _content: &str) -> Result<String, ClientError> {
            self.1
                .map(str::to_string)
                .ok_or(ClientError::EmptyResponse("fixed"))
        }
    }

    #[test]
    fn first_success_wins() {
        let failing = Fixed("a", None);
        let blank = Fixed("b", Some("  "));
        let good = Fixed("c", Some("{}"));
        assert_eq!(summarize_with_fallback(&[&failing, &blank, &good], "x"), "{}");
    }

    #[test]
    fn empty_chain_yields_no_api() {
        assert_eq!(summarize_with_fallback(&[], "x"), NO_API_RESPONSE);
        let failing = Fixed("a", None);
        assert_eq!(summarize_with_fallback(&[&failing], "x"), NO_API_RESPONSE);
    }
}
