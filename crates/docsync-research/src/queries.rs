//! Search query configuration (`search-queries.json`)

use crate::ClientError;
use std::collections::BTreeMap;
use std::path::Path;

/// Scope used when the requested one is unknown
pub const DEFAULT_SCOPE: &str = "all";

/// Query lists keyed by scope
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SearchQueries {
    scopes: BTreeMap<String, Vec<String>>,
}

impl Default for SearchQueries {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SearchQueries {
    /// Built-in query set
    #[must_use]
    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 6] = [
            (
                "all",
                &[
                    "Claude AI updates January 2026",
                    "Anthropic Claude Code CLI new features",
                    "Claude MCP Model Context Protocol updates",
                    "Claude API pricing changes 2026",
                    "Claude Skills marketplace new",
                    "OpenCode CLI vs Claude Code",
                    "Claude Opus Sonnet Haiku updates",
                ],
            ),
            (
                "claude-models",
                &[
                    "Claude Opus 4.5 updates",
                    "Claude Sonnet 4.5 new features",
                    "Anthropic model releases 2026",
                ],
            ),
            (
                "claude-code",
                &[
                    "Claude Code CLI updates",
                    "Claude Code new features",
                    "Claude Code vs Cursor vs Continue",
                ],
            ),
            (
                "mcp",
                &[
                    "Model Context Protocol updates",
                    "MCP servers new releases",
                    "Claude MCP integrations",
                ],
            ),
            (
                "pricing",
                &[
                    "Claude API pricing 2026",
                    "Anthropic pricing changes",
                    "Claude tokens cost comparison",
                ],
            ),
            (
                "tools",
                &[
                    "Claude ecosystem tools",
                    "OpenCode CLI updates",
                    "AirLLM Claude integration",
                ],
            ),
        ];
        Self {
            scopes: table
                .into_iter()
                .map(|(scope, queries)| {
                    (
                        scope.to_string(),
                        queries.iter().map(|q| (*q).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Load from `path`, falling back to [`SearchQueries::builtin`] when the
    /// file is absent or malformed
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(queries)) => queries,
            Ok(None) => Self::builtin(),
            Err(e) => {
                tracing::warn!("Ignoring query file: {}", e);
                Self::builtin()
            }
        }
    }

    /// Load from `path`; `Ok(None)` when the file does not exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, ClientError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ClientError::io_error(path, e))?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Queries for `scope`, or the `all` list when the scope is unknown
    #[must_use]
    pub fn for_scope(&self, scope: &str) -> &[String] {
        self.scopes
            .get(scope)
            .or_else(|| self.scopes.get(DEFAULT_SCOPE))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
