//! Findings → summarizer input, analysis → persisted summary

use docsync_model::{Analysis, AnalysisSummary, FindingsReport, Impact};
use std::collections::BTreeSet;

/// Separator placed between individual findings in the summarizer input
pub const CONTENT_SEPARATOR: &str = "\n\n---\n\n";

const NO_SUMMARY: &str = "No summary available";

/// Flatten search answers and release notes into one text block
///
/// Issues are collected for the record but not sent to the summarizer.
#[must_use]
pub fn compose_content(findings: &FindingsReport) -> String {
    let searches = findings
        .perplexity_results
        .iter()
        .map(|r| format!("Query: {}\n{}", r.query, r.response));
    let releases = findings.github_releases.iter().flat_map(|group| {
        group.releases.iter().map(move |release| {
            format!(
                "GitHub Release: {} - {}\nPublished: {}\n{}",
                group.repo, release.tag, release.published, release.body
            )
        })
    });
    searches.chain(releases).collect::<Vec<_>>().join(CONTENT_SEPARATOR)
}

/// Build the persisted summary for one analysis
///
/// `has_updates` is recomputed from the updates themselves rather than taken
/// from the summarizer's `no_updates` flag alone.
#[must_use]
pub fn summarize(
    analysis: &Analysis,
    findings: &FindingsReport,
    timestamp: impl Into<String>,
) -> AnalysisSummary {
    let topics: BTreeSet<String> = analysis
        .updates
        .iter()
        .map(|u| u.category.as_str().to_string())
        .collect();
    let summary = if analysis.summary.trim().is_empty() {
        NO_SUMMARY.to_string()
    } else {
        analysis.summary.clone()
    };
    AnalysisSummary {
        timestamp: timestamp.into(),
        has_updates: analysis.has_actionable_updates(),
        summary,
        topics_found: topics.into_iter().collect(),
        source_count: findings.source_count(),
        updates: analysis.updates.clone(),
        high_impact_count: analysis.count_impact(Impact::High),
        medium_impact_count: analysis.count_impact(Impact::Medium),
    }
}
