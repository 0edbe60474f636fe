//! Source-hosting client: recent releases and issues

use crate::error::check_status;
use crate::ClientError;
use chrono::{DateTime, Duration as Window, Utc};
use docsync_model::text::truncate_chars;
use docsync_model::{IssueSummary, ReleaseSummary};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "GitHub";

/// API root
pub const API_ROOT: &str = "https://api.github.com";
/// Per-call timeout
pub const TIMEOUT: Duration = Duration::from_secs(15);

/// Repositories whose releases are watched
pub const RELEASE_REPOS: [&str; 4] = [
    "anthropics/anthropic-sdk-python",
    "anthropics/courses",
    "modelcontextprotocol/servers",
    "obra/superpowers-chrome",
];

/// Repositories whose issues are watched, with label filters
pub const ISSUE_REPOS: [(&str, &[&str]); 1] =
    [("anthropics/anthropic-sdk-python", &["bug", "enhancement"])];

const RELEASES_CHECKED: usize = 10;
const RELEASE_WINDOW_DAYS: i64 = 30;
const ISSUE_WINDOW_DAYS: i64 = 14;
const BODY_CHARS: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRelease {
    tag_name: String,
    name: Option<String>,
    published_at: Option<String>,
    html_url: String,
    body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawIssue {
    number: u64,
    title: String,
    state: String,
    updated_at: String,
    html_url: String,
    #[serde(default)]
    labels: Vec<RawLabel>,
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Releases among the first ten published within 30 days of `now`
pub(crate) fn recent_releases(raw: Vec<RawRelease>, now: DateTime<Utc>) -> Vec<ReleaseSummary> {
    let cutoff = now - Window::days(RELEASE_WINDOW_DAYS);
    raw.into_iter()
        .take(RELEASES_CHECKED)
        .filter_map(|r| {
            let published = r.published_at?;
            (parse_time(&published)? > cutoff).then(|| ReleaseSummary {
                tag: r.tag_name,
                name: r.name,
                published,
                url: r.html_url,
                body: truncate_chars(r.body.as_deref().unwrap_or_default(), BODY_CHARS).to_string(),
            })
        })
        .collect()
}

/// Issues updated within 14 days of `now`
pub(crate) fn recent_issues(raw: Vec<RawIssue>, now: DateTime<Utc>) -> Vec<IssueSummary> {
    let cutoff = now - Window::days(ISSUE_WINDOW_DAYS);
    raw.into_iter()
        .filter(|i| parse_time(&i.updated_at).is_some_and(|t| t > cutoff))
        .map(|i| IssueSummary {
            number: i.number,
            title: i.title,
            state: i.state,
            updated: i.updated_at,
            url: i.html_url,
            labels: i.labels.into_iter().map(|l| l.name).collect(),
        })
        .collect()
}

/// A repository host
pub trait RepoApi {
    /// Recent releases of `repo` (`owner/name`)
    ///
    /// # Errors
    /// Returns an error if the call fails.
    fn releases(&self, repo: &str, now: DateTime<Utc>) -> Result<Vec<ReleaseSummary>, ClientError>;

    /// Recently updated issues of `repo` carrying any of `labels`
    ///
    /// # Errors
    /// Returns an error if the call fails.
    fn issues(
        &self,
        repo: &str,
        labels: &[&str],
        now: DateTime<Utc>,
    ) -> Result<Vec<IssueSummary>, ClientError>;
}

impl<T: RepoApi + ?Sized> RepoApi for &T {
    fn releases(&self, repo: &str, now: DateTime<Utc>) -> Result<Vec<ReleaseSummary>, ClientError> {
        (**self).releases(repo, now)
    }

    fn issues(
        &self,
        repo: &str,
        labels: &[&str],
        now: DateTime<Utc>,
    ) -> Result<Vec<IssueSummary>, ClientError> {
        (**self).issues(repo, labels, now)
    }
}

/// Blocking source-hosting client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_root: String,
}

impl GitHubClient {
    /// Create client, authenticating with `token` when given
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("Claude-Research-Bot"));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("token {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Ignoring GITHUB_TOKEN with invalid characters"),
            }
        }
        Ok(Self {
            http: Client::builder()
                .default_headers(headers)
                .timeout(TIMEOUT)
                .build()?,
            api_root: API_ROOT.to_string(),
        })
    }

    /// Override the API root
    #[must_use]
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }
}

impl RepoApi for GitHubClient {
    fn releases(&self, repo: &str, now: DateTime<Utc>) -> Result<Vec<ReleaseSummary>, ClientError> {
        let url = format!("{}/repos/{repo}/releases", self.api_root);
        let response = self.http.get(url).send()?;
        let raw: Vec<RawRelease> = check_status(SERVICE, response)?.json()?;
        Ok(recent_releases(raw, now))
    }

    fn issues(
        &self,
        repo: &str,
        labels: &[&str],
        now: DateTime<Utc>,
    ) -> Result<Vec<IssueSummary>, ClientError> {
        let url = format!("{}/repos/{repo}/issues", self.api_root);
        let mut query = vec![
            ("state", "all".to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", "20".to_string()),
        ];
        if !labels.is_empty() {
            query.push(("labels", labels.join(",")));
        }
        let response = self.http.get(url).query(&query).send()?;
        let raw: Vec<RawIssue> = check_status(SERVICE, response)?.json()?;
        Ok(recent_issues(raw, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        parse_time("2026-01-20T12:00:00Z").unwrap()
    }

    fn release(tag: &str, published: Option<&str>, body: Option<&str>) -> RawRelease {
        RawRelease {
            tag_name: tag.into(),
            name: Some(tag.into()),
            published_at: published.map(Into::into),
            html_url: format!("https://example.com/{tag}"),
            body: body.map(Into::into),
        }
    }

    #[test]
    fn releases_window_and_truncation() {
        let long = "b".repeat(600);
        let raw = vec![
            release("v3", Some("2026-01-19T00:00:00Z"), Some(&long)),
            release("v2", Some("2025-11-01T00:00:00Z"), None),
            release("draft", None, None),
            release("v1", Some("2026-01-01T00:00:00Z"), None),
        ];
        let recent = recent_releases(raw, now());
        let tags: Vec<&str> = recent.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, ["v3", "v1"]);
        assert_eq!(recent[0].body.len(), 500);
        assert_eq!(recent[1].body, "");
    }

    #[test]
    fn only_first_ten_releases_are_considered() {
        let raw: Vec<RawRelease> = (0..12)
            .map(|i| release(&format!("v{i}"), Some("2026-01-19T00:00:00Z"), None))
            .collect();
        assert_eq!(recent_releases(raw, now()).len(), 10);
    }

    #[test]
    fn issues_window() {
        let issue = |n: u64, updated: &str| RawIssue {
            number: n,
            title: format!("issue {n}"),
            state: "open".into(),
            updated_at: updated.into(),
            html_url: String::new(),
            labels: vec![RawLabel { name: "bug".into() }],
        };
        let recent = recent_issues(
            vec![
                issue(1, "2026-01-15T00:00:00Z"),
                issue(2, "2025-12-01T00:00:00Z"),
                issue(3, "not a date"),
            ],
            now(),
        );
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].number, 1);
        assert_eq!(recent[0].labels, ["bug"]);
    }

    #[test]
    fn raw_release_deserializes_nulls() {
        let raw: Vec<RawRelease> = serde_json::from_str(
            r#"[{"tag_name": "v1", "name": null, "published_at": "2026-01-19T00:00:00Z", "html_url": "u", "body": null, "extra": 1}]"#,
        )
        .unwrap();
        assert_eq!(recent_releases(raw, now())[0].name, None);
    }
}
