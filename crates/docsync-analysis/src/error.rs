//! Error types for the analysis crate
//!
//! Neither error escapes a stage: the response parser degrades to the
//! sentinel analysis and the rule store to its built-in defaults. The typed
//! variants exist so callers can log why.

use std::path::PathBuf;

/// Why a summarizer response could not be turned into an analysis
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Nothing left after fence extraction and trimming
    #[error("response contained no JSON payload")]
    Empty,

    /// Payload is not JSON or not shaped like an analysis
    #[error("invalid analysis JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a rule configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid rule configuration
    #[error("malformed rule configuration in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RuleError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-configuration error for path
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_display() {
        assert_eq!(
            ResponseError::Empty.to_string(),
            "response contained no JSON payload"
        );
    }

    #[test]
    fn rule_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RuleError::malformed("config/auto-update-rules.json", source);
        assert!(err
            .to_string()
            .starts_with("malformed rule configuration in config/auto-update-rules.json"));
    }
}
