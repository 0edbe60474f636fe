//! docsync data model
//!
//! Plain data shared by every pipeline stage. Nothing in this crate touches
//! the filesystem or the network; stages own their side effects.
//!
//! # Stage artifacts
//!
//! ```text
//! research ──► research_findings.json ──► analyze ──► analysis_summary.json
//!                                                 └─► update_recommendations.json
//! analysis_summary.json ──► update ──► VERSION / CHANGELOG.md / INDEX.md / guide
//!                                  └─► update_log.json
//! corpus ──► validate ──► report (stdout) + exit status
//! ```
//!
//! Changes to the artifact structs alter the on-disk JSON contract between
//! stages; keep them additive (`#[serde(default)]` on new fields).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod artifacts;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod rule;
pub mod text;
pub mod update;
pub mod validation;
pub mod version;

pub use artifacts::{
    AnalysisSummary, FindingsReport, IssueSummary, ReleaseSummary, RepoIssues, RepoReleases,
    SearchResult, UpdateLog,
};
pub use config::{CorpusLayout, PipelineConfig};
pub use error::VersionError;
pub use recommendation::{Action, Recommendation};
pub use rule::{RuleConfig, TopicRule};
pub use update::{Analysis, Category, Impact, Update};
pub use validation::{Severity, ValidationFinding};
pub use version::{BumpKind, Version};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
