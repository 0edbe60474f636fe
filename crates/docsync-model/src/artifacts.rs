//! Persisted artifacts exchanged between pipeline stages
//!
//! Stages never share memory; each one reads the previous stage's JSON file
//! from the output directory and writes its own.

use crate::update::{Impact, Update};
use crate::version::{BumpKind, Version};
use serde::{Deserialize, Serialize};

/// Raw findings written by the research stage (`research_findings.json`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FindingsReport {
    /// ISO-8601 collection time
    #[serde(default)]
    pub timestamp: String,
    /// Search scope selector used for the run
    #[serde(default)]
    pub scope: String,
    /// Answers from the search API, one per query
    #[serde(default)]
    pub perplexity_results: Vec<SearchResult>,
    /// Recent releases grouped by repository
    #[serde(default)]
    pub github_releases: Vec<RepoReleases>,
    /// Recently updated issues grouped by repository
    #[serde(default)]
    pub github_issues: Vec<RepoIssues>,
    /// Human-readable failures of individual calls
    #[serde(default)]
    pub errors: Vec<String>,
}

impl FindingsReport {
    /// Report for a run that could not query anything
    #[must_use]
    pub fn unavailable(timestamp: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            scope: "none".to_string(),
            errors: vec![reason.into()],
            ..Self::default()
        }
    }

    /// Number of sources counted by the analysis stage
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.perplexity_results.len() + self.github_releases.len()
    }

    /// Total releases across all repositories
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.github_releases.iter().map(|r| r.releases.len()).sum()
    }

    /// Total issues across all repositories
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.github_issues.iter().map(|r| r.issues.len()).sum()
    }
}

/// One answered search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Query string
    pub query: String,
    /// Answer text
    #[serde(default)]
    pub response: String,
    /// Source URLs cited by the answer
    #[serde(default)]
    pub citations: Vec<String>,
}

/// Releases of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoReleases {
    /// `owner/name`
    pub repo: String,
    /// Releases inside the recency window
    #[serde(default)]
    pub releases: Vec<ReleaseSummary>,
}

/// One release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    /// Tag name
    pub tag: String,
    /// Display name, when set
    #[serde(default)]
    pub name: Option<String>,
    /// Publication timestamp as reported by the host
    #[serde(default)]
    pub published: String,
    /// HTML URL
    #[serde(default)]
    pub url: String,
    /// Release notes, truncated
    #[serde(default)]
    pub body: String,
}

/// Issues of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIssues {
    /// `owner/name`
    pub repo: String,
    /// Issues inside the recency window
    #[serde(default)]
    pub issues: Vec<IssueSummary>,
}

/// One issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Issue number
    pub number: u64,
    /// Title
    pub title: String,
    /// `open` or `closed`
    pub state: String,
    /// Last update timestamp
    pub updated: String,
    /// HTML URL
    pub url: String,
    /// Label names
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Output of the analysis stage (`analysis_summary.json`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// ISO-8601 analysis time
    #[serde(default)]
    pub timestamp: String,
    /// Recomputed from the updates, not copied from the model's flag
    #[serde(default)]
    pub has_updates: bool,
    /// Model summary
    #[serde(default)]
    pub summary: String,
    /// Distinct update categories, sorted
    #[serde(default)]
    pub topics_found: Vec<String>,
    /// Search results plus release groups analysed
    #[serde(default)]
    pub source_count: usize,
    /// Every parsed update, including low impact ones
    #[serde(default)]
    pub updates: Vec<Update>,
    /// Updates with high impact
    #[serde(default)]
    pub high_impact_count: usize,
    /// Updates with medium impact
    #[serde(default)]
    pub medium_impact_count: usize,
}

impl AnalysisSummary {
    /// A summary with nothing to do
    #[must_use]
    pub fn empty(timestamp: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Whether any update is high impact
    #[must_use]
    pub fn has_high_impact(&self) -> bool {
        self.updates.iter().any(|u| u.impact == Impact::High)
    }
}

/// Record of one update-stage run (`update_log.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLog {
    /// ISO-8601 run time
    pub timestamp: String,
    /// VERSION contents before the run, verbatim
    pub previous_version: String,
    /// Version written by the run
    pub new_version: Version,
    /// Bump applied
    pub bump_type: BumpKind,
    /// Artifacts actually rewritten
    pub files_updated: Vec<String>,
    /// Updates in the analysis summary
    pub updates_processed: usize,
}
