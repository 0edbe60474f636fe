//! Research collection across search and repository sources

use crate::github::{RepoApi, ISSUE_REPOS, RELEASE_REPOS};
use crate::pacing::Pacer;
use crate::perplexity::{SearchApi, SearchResponse};
use crate::ClientError;
use chrono::{DateTime, Utc};
use docsync_model::text::truncate_chars;
use docsync_model::{FindingsReport, RepoIssues, RepoReleases, SearchResult};
use std::path::{Path, PathBuf};

const RAW_NAME_CHARS: usize = 50;

/// File name for a raw search response
#[must_use]
pub fn raw_response_name(query: &str) -> String {
    let safe = query.replace([' ', '/', '\\'], "_");
    format!("perplexity_{}.json", truncate_chars(&safe, RAW_NAME_CHARS))
}

/// Collects findings for one scope
pub struct Collector<S, R> {
    search: S,
    repos: R,
    raw_dir: PathBuf,
    search_pacer: Pacer,
    repo_pacer: Pacer,
    release_repos: Vec<String>,
    issue_repos: Vec<(String, Vec<String>)>,
}

impl<S: SearchApi, R: RepoApi> Collector<S, R> {
    /// Collector writing raw responses under `raw_dir`
    #[must_use]
    pub fn new(search: S, repos: R, raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            search,
            repos,
            raw_dir: raw_dir.into(),
            search_pacer: Pacer::new(Pacer::SEARCH),
            repo_pacer: Pacer::new(Pacer::GITHUB),
            release_repos: RELEASE_REPOS.iter().map(|r| (*r).to_string()).collect(),
            issue_repos: ISSUE_REPOS
                .iter()
                .map(|(repo, labels)| {
                    (
                        (*repo).to_string(),
                        labels.iter().map(|l| (*l).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Replace both pacers
    #[must_use]
    pub fn with_pacers(mut self, search: Pacer, repos: Pacer) -> Self {
        self.search_pacer = search;
        self.repo_pacer = repos;
        self
    }

    /// Replace the watched repositories
    #[must_use]
    pub fn with_repos(
        mut self,
        releases: Vec<String>,
        issues: Vec<(String, Vec<String>)>,
    ) -> Self {
        self.release_repos = releases;
        self.issue_repos = issues;
        self
    }

    /// Run every query, then the repository checks
    ///
    /// Failed searches are recorded in `errors`; failed repository calls are
    /// logged and skipped. Never fails as a whole.
    pub fn collect(
        &mut self,
        scope: &str,
        queries: &[String],
        timestamp: impl Into<String>,
        now: DateTime<Utc>,
    ) -> FindingsReport {
        let mut findings = FindingsReport {
            timestamp: timestamp.into(),
            scope: scope.to_string(),
            ..FindingsReport::default()
        };

        tracing::info!("Running {} searches", queries.len());
        for (i, query) in queries.iter().enumerate() {
            tracing::info!("  [{}/{}] Searching: {}", i + 1, queries.len(), query);
            self.search_pacer.wait();
            match self.search.search(query) {
                Ok(response) => {
                    if let Err(e) = self.save_raw(query, &response) {
                        tracing::warn!("Could not save raw response: {}", e);
                    }
                    findings.perplexity_results.push(SearchResult {
                        query: query.clone(),
                        response: response.content,
                        citations: response.citations,
                    });
                }
                Err(e) => {
                    tracing::error!("Search failed for '{}': {}", query, e);
                    findings.errors.push(format!("Perplexity search failed: {query}"));
                }
            }
        }

        tracing::info!("Checking {} repositories", self.release_repos.len());
        for repo in &self.release_repos {
            self.repo_pacer.wait();
            match self.repos.releases(repo, now) {
                Ok(releases) if !releases.is_empty() => findings.github_releases.push(RepoReleases {
                    repo: repo.clone(),
                    releases,
                }),
                Ok(_) => tracing::debug!("No recent releases in {}", repo),
                Err(e) => tracing::warn!("Release fetch failed for {}: {}", repo, e),
            }
        }

        for (repo, labels) in &self.issue_repos {
            self.repo_pacer.wait();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            match self.repos.issues(repo, &labels, now) {
                Ok(issues) if !issues.is_empty() => findings.github_issues.push(RepoIssues {
                    repo: repo.clone(),
                    issues,
                }),
                Ok(_) => tracing::debug!("No recent issues in {}", repo),
                Err(e) => tracing::warn!("Issue fetch failed for {}: {}", repo, e),
            }
        }

        tracing::info!(
            "Research complete: {} searches, {} releases, {} issues, {} errors",
            findings.perplexity_results.len(),
            findings.release_count(),
            findings.issue_count(),
            findings.errors.len()
        );
        findings
    }

    fn save_raw(&self, query: &str, response: &SearchResponse) -> Result<(), ClientError> {
        write_json(&self.raw_dir.join(raw_response_name(query)), &response.raw)
    }
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClientError::io_error(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| ClientError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_names_are_sanitized_and_bounded() {
        assert_eq!(raw_response_name("MCP servers"), "perplexity_MCP_servers.json");
        assert_eq!(raw_response_name("a/b"), "perplexity_a_b.json");
        let long = raw_response_name(&"q".repeat(80));
        assert_eq!(long, format!("perplexity_{}.json", "q".repeat(50)));
    }
}
