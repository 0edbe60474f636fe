//! Prompt text sent to the search and summarizer services

use docsync_model::text::truncate_chars;

/// System prompt for search calls
pub const SEARCH_SYSTEM: &str = "You are a research assistant. Provide factual, up-to-date information with sources. Focus on recent developments and concrete facts.";

/// System prompt for summarizer calls made through the search service
pub const ANALYST_SYSTEM: &str = "You are a technical analyst. Extract structured information from research findings. Always respond with valid JSON.";

/// Content budget for the search service's summarizer
pub const SEARCH_CONTENT_CHARS: usize = 8000;

/// Content budget for the messages API summarizer
pub const MESSAGES_CONTENT_CHARS: usize = 12000;

const RESPONSE_SHAPE: &str = r#"{
    "summary": "2-3 sentence summary of the most important findings",
    "updates": [
        {
            "title": "Update title",
            "description": "What changed",
            "date": "YYYY-MM-DD or 'recent'",
            "category": "models|claude-code|mcp|pricing|skills|ecosystem",
            "impact": "high|medium|low",
            "source": "Source URL if available"
        }
    ],
    "no_updates": true/false
}"#;

/// User prompt for one search query
#[must_use]
pub fn search(query: &str) -> String {
    format!(
        "Search for the latest information on: {query}. Include specific dates, version numbers, and source URLs where available."
    )
}

/// Summarization prompt with `content` cut to `max_chars`
#[must_use]
pub fn analysis(content: &str, max_chars: usize) -> String {
    format!(
        "Analyze these research findings about Claude AI ecosystem updates.\n\n\
         Extract significant updates and categorize them. For each update, identify:\n\
         - What changed (be specific: version numbers, features, prices)\n\
         - When it happened (dates if available)\n\
         - Impact level (high/medium/low)\n\
         - Category (models, claude-code, mcp, pricing, skills, ecosystem)\n\n\
         Research findings:\n{}\n\n\
         Respond ONLY with valid JSON in this format:\n{}",
        truncate_chars(content, max_chars),
        RESPONSE_SHAPE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_truncates_content() {
        let content = "x".repeat(SEARCH_CONTENT_CHARS + 100);
        let prompt = analysis(&content, SEARCH_CONTENT_CHARS);
        assert!(prompt.contains(&"x".repeat(SEARCH_CONTENT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(SEARCH_CONTENT_CHARS + 1)));
        assert!(prompt.contains("\"no_updates\": true/false"));
    }

    #[test]
    fn search_prompt_embeds_query() {
        assert!(search("MCP servers").starts_with("Search for the latest information on: MCP servers."));
    }
}
