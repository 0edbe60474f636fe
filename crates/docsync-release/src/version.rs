//! VERSION file handling and bump policy

use crate::{read_text, write_text, ReleaseError};
use docsync_model::{BumpKind, Version};
use std::path::Path;

/// Computes and persists the corpus version
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionManager;

impl VersionManager {
    /// Contents reported when the VERSION file is missing
    pub const MISSING: &'static str = "0.0.0";

    /// Create new version manager
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Next version under the automatic policy
    ///
    /// Minor bump when `high_impact_count >= 3`, patch bump otherwise. A
    /// malformed `current`, or one whose bumped component is already at its
    /// limit, does not fail: the result is reset to `0.0.1`.
    #[must_use]
    pub fn bump(&self, current: &str, high_impact_count: usize) -> (Version, BumpKind) {
        let kind = BumpKind::for_high_impact_count(high_impact_count);
        (self.bump_with(current, kind), kind)
    }

    /// Apply an explicit bump kind; `Major` is only reachable this way
    #[must_use]
    pub fn bump_with(&self, current: &str, kind: BumpKind) -> Version {
        match current.parse::<Version>() {
            Ok(version) => version.checked_bump(kind).unwrap_or_else(|| {
                tracing::warn!(
                    "Resetting version to {}: {} bump of {} overflows",
                    Version::RECOVERY,
                    kind,
                    version
                );
                Version::RECOVERY
            }),
            Err(e) => {
                tracing::warn!("Resetting version to {}: {}", Version::RECOVERY, e);
                Version::RECOVERY
            }
        }
    }

    /// Current VERSION contents, trimmed; `0.0.0` when the file is missing
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn read(&self, path: &Path) -> Result<String, ReleaseError> {
        if !path.exists() {
            return Ok(Self::MISSING.to_string());
        }
        Ok(read_text(path)?.trim().to_string())
    }

    /// Write `version` as a single line
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path, version: Version) -> Result<(), ReleaseError> {
        write_text(path, &format!("{version}\n"))
    }
}
