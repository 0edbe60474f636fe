//! Semantic version of the documentation corpus

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `major.minor.patch`, ordered lexicographically by component
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

/// Which component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    /// Manual only; never chosen by the automatic policy
    Major,
    /// Three or more high-impact updates
    Minor,
    /// Everything else
    Patch,
}

impl BumpKind {
    /// High-impact count at which the automatic policy moves from patch to minor
    pub const MINOR_THRESHOLD: usize = 3;

    /// Automatic policy: minor iff `high_impact_count >= 3`, otherwise patch
    #[inline]
    #[must_use]
    pub fn for_high_impact_count(high_impact_count: usize) -> Self {
        if high_impact_count >= Self::MINOR_THRESHOLD {
            Self::Minor
        } else {
            Self::Patch
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        })
    }
}

impl Version {
    /// Value used when a malformed version string is bumped
    pub const RECOVERY: Self = Self::new(0, 0, 1);

    /// Create a version from its components
    #[inline]
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Increment the requested component, zeroing the ones below it
    ///
    /// `None` when the component is already at `u64::MAX`.
    #[must_use]
    pub fn checked_bump(self, kind: BumpKind) -> Option<Self> {
        Some(match kind {
            BumpKind::Major => Self::new(self.major.checked_add(1)?, 0, 0),
            BumpKind::Minor => Self::new(self.major, self.minor.checked_add(1)?, 0),
            BumpKind::Patch => Self::new(self.major, self.minor, self.patch.checked_add(1)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::WrongComponentCount {
                input: trimmed.to_string(),
                found: parts.len(),
            });
        }
        let component = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| VersionError::invalid_component(trimmed, part))
        };
        Ok(Self::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}
