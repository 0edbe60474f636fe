//! Error types for the release crate
//!
//! Every variant is recoverable at the stage level: the update stage logs it,
//! reports the artifact as not updated and moves on to the next one.

use docsync_model::Version;
use std::path::PathBuf;

/// Errors while merging a changelog entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangelogError {
    /// The changelog already has a section for this version
    #[error("changelog already contains a section for version {0}")]
    DuplicateVersion(Version),
}

/// Errors while applying release changes to corpus files
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// Target document does not exist
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    /// IO error during read or write
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Changelog merge refused
    #[error("changelog error: {0}")]
    Changelog(#[from] ChangelogError),
}

impl ReleaseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_version_display() {
        let err = ChangelogError::DuplicateVersion(Version::new(2, 0, 4));
        assert_eq!(
            err.to_string(),
            "changelog already contains a section for version 2.0.4"
        );
    }

    #[test]
    fn error_conversions() {
        let err: ReleaseError = ChangelogError::DuplicateVersion(Version::new(1, 0, 0)).into();
        assert!(matches!(err, ReleaseError::Changelog(_)));
    }
}
