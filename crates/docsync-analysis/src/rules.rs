//! Topic rule store
//!
//! Rules come from `auto-update-rules.json` in the config directory. When the
//! file is absent the built-in rule set is used, so a fresh checkout still
//! routes updates somewhere sensible.

use crate::error::RuleError;
use docsync_model::{RuleConfig, TopicRule};
use std::path::Path;

/// Holds topic → keyword → target-file rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStore {
    config: RuleConfig,
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleStore {
    /// Wrap an already parsed configuration
    #[inline]
    #[must_use]
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// The fixed default rule set
    #[must_use]
    pub fn builtin() -> Self {
        let mut config = RuleConfig::default();
        let topics = &mut config.topics;
        topics.insert(
            "claude_models".to_string(),
            TopicRule::new(
                &["Opus", "Sonnet", "Haiku", "model", "release", "version"],
                &["Claude-Prompt-Guide.md"],
                &["## Claude Models Overview", "## Claude vs Competition"],
            ),
        );
        topics.insert(
            "claude_code".to_string(),
            TopicRule::new(
                &["Claude Code", "CLI", "terminal", "v2.1", "v2.2"],
                &["Claude-Prompt-Guide.md", "docs/claude-code-guide.md"],
                &["### Claude Code"],
            ),
        );
        topics.insert(
            "mcp".to_string(),
            TopicRule::new(
                &["MCP", "Model Context Protocol", "server", "plugin"],
                &["docs/mcp-integration.md", "docs/mcp-ecosystem-overview.md"],
                &["## Model Context Protocol"],
            ),
        );
        topics.insert(
            "pricing".to_string(),
            TopicRule::new(
                &["pricing", "cost", "token", "MTok", "$"],
                &["docs/pricing-comparison-jan-2026.md", "Claude-Prompt-Guide.md"],
                &["## Pricing", "### Pricing"],
            ),
        );
        topics.insert(
            "skills".to_string(),
            TopicRule::new(
                &["Skills", "skill", "marketplace", "plugin"],
                &["docs/skills-guide.md", "Claude-Prompt-Guide.md"],
                &["## Claude Skills", "### Skills"],
            ),
        );
        topics.insert(
            "ecosystem_tools".to_string(),
            TopicRule::new(
                &["OpenCode", "AirLLM", "Codex", "Cursor", "Continue"],
                &["docs/research-opencode-clawbot-jan-2026.md", "Claude-Prompt-Guide.md"],
                &["## Ecosystem Tools"],
            ),
        );
        Self { config }
    }

    /// Parse a rule configuration document
    ///
    /// # Errors
    /// Returns [`RuleError::Malformed`] if `json` is not a rule configuration.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, RuleError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| RuleError::malformed(origin, e))
    }

    /// Load rules from `path`
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, RuleError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|e| RuleError::io_error(path, e))?;
        Self::from_json(&raw, path).map(Some)
    }

    /// Load rules from `path`, falling back to [`RuleStore::builtin`]
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(store)) => {
                tracing::debug!("Loaded {} topic rules from {}", store.len(), path.display());
                store
            }
            Ok(None) => {
                tracing::debug!("No rule file at {}, using built-in rules", path.display());
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!("Ignoring rule file: {}", e);
                Self::builtin()
            }
        }
    }

    /// Rules in configuration order
    pub fn topics(&self) -> impl Iterator<Item = (&str, &TopicRule)> {
        self.config.topics.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rule for a topic
    #[must_use]
    pub fn get(&self, topic: &str) -> Option<&TopicRule> {
        self.config.topics.get(topic)
    }

    /// Number of topics
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.config.topics.len()
    }

    /// Whether the store has no topics
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.config.topics.is_empty()
    }

    /// Underlying configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_has_six_topics_in_order() {
        let store = RuleStore::builtin();
        let names: Vec<&str> = store.topics().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "claude_models",
                "claude_code",
                "mcp",
                "pricing",
                "skills",
                "ecosystem_tools"
            ]
        );
        assert!(store.get("pricing").unwrap().keywords.contains("MTok"));
    }

    #[test]
    fn from_json_reads_topics() {
        let json = r#"{"topics": {"pricing": {"keywords": ["cost"], "target_files": ["docs/pricing.md"], "sections": []}}}"#;
        let store = RuleStore::from_json(json, Path::new("rules.json")).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("pricing").unwrap().target_files.contains("docs/pricing.md"));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            RuleStore::from_json("{\"topics\": 3}", Path::new("rules.json")),
            Err(RuleError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_file_is_none_and_defaults() {
        let path = PathBuf::from("/definitely/not/here/rules.json");
        assert!(RuleStore::load(&path).unwrap().is_none());
        assert_eq!(RuleStore::load_or_default(&path), RuleStore::builtin());
    }

    #[test]
    fn malformed_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto-update-rules.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(RuleStore::load(&path).is_err());
        assert_eq!(RuleStore::load_or_default(&path), RuleStore::builtin());
    }

    #[test]
    fn file_rules_replace_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto-update-rules.json");
        std::fs::write(
            &path,
            r#"{"topics": {"only": {"keywords": ["x"], "target_files": ["a.md"]}}}"#,
        )
        .unwrap();
        let store = RuleStore::load_or_default(&path);
        assert_eq!(store.len(), 1);
        assert!(store.get("pricing").is_none());
    }
}
