//! Research collection against in-process fakes

use chrono::{DateTime, Utc};
use docsync_model::{IssueSummary, ReleaseSummary};
use docsync_research::{
    ClientError, Collector, Pacer, RepoApi, SearchApi, SearchResponse, SearchQueries,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;

struct FakeSearch {
    failing: &'static str,
    seen: RefCell<Vec<String>>,
}

impl FakeSearch {
    fn failing_on(query: &'static str) -> Self {
        Self {
            failing: query,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl SearchApi for FakeSearch {
    fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        self.seen.borrow_mut().push(query.to_string());
        if query == self.failing {
            return Err(ClientError::Status {
                service: "Perplexity",
                status: 500,
                body: String::new(),
            });
        }
        Ok(SearchResponse::from_body(json!({
            "choices": [{"message": {"content": format!("answer to {query}")}}],
            "citations": ["https://news.example/1"]
        })))
    }
}

struct FakeRepos;

impl RepoApi for FakeRepos {
    fn releases(&self, repo: &str, _now: DateTime<Utc>) -> Result<Vec<ReleaseSummary>, ClientError> {
        match repo {
            "acme/sdk" => Ok(vec![ReleaseSummary {
                tag: "v1.2.0".into(),
                name: None,
                published: "2026-01-18T00:00:00Z".into(),
                url: "https://hub.example/acme/sdk/v1.2.0".into(),
                body: "notes".into(),
            }]),
            "acme/quiet" => Ok(Vec::new()),
            _ => Err(ClientError::EmptyResponse("GitHub")),
        }
    }

    fn issues(
        &self,
        repo: &str,
        labels: &[&str],
        _now: DateTime<Utc>,
    ) -> Result<Vec<IssueSummary>, ClientError> {
        Ok(vec![IssueSummary {
            number: 7,
            title: format!("{repo} {}", labels.join("+")),
            state: "open".into(),
            updated: "2026-01-19T00:00:00Z".into(),
            url: String::new(),
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
        }])
    }
}

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-20T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn collects_searches_releases_and_issues() {
    let dir = tempfile::tempdir().unwrap();
    let raw_dir = dir.path().join("raw_responses");
    let queries = vec!["MCP servers".to_string(), "broken query".to_string()];

    let mut collector = Collector::new(FakeSearch::failing_on("broken query"), FakeRepos, &raw_dir)
        .with_pacers(Pacer::unpaced(), Pacer::unpaced())
        .with_repos(
            vec!["acme/sdk".into(), "acme/quiet".into(), "acme/down".into()],
            vec![("acme/sdk".into(), vec!["bug".into(), "enhancement".into()])],
        );
    let findings = collector.collect("mcp", &queries, "2026-01-20T00:00:00", now());

    assert_eq!(findings.scope, "mcp");
    assert_eq!(findings.timestamp, "2026-01-20T00:00:00");
    assert_eq!(findings.perplexity_results.len(), 1);
    assert_eq!(findings.perplexity_results[0].query, "MCP servers");
    assert_eq!(findings.perplexity_results[0].response, "answer to MCP servers");
    assert_eq!(findings.perplexity_results[0].citations, ["https://news.example/1"]);
    assert_eq!(findings.errors, ["Perplexity search failed: broken query"]);

    // empty and failing repositories are left out
    assert_eq!(findings.github_releases.len(), 1);
    assert_eq!(findings.github_releases[0].repo, "acme/sdk");
    assert_eq!(findings.github_issues.len(), 1);
    assert_eq!(findings.github_issues[0].issues[0].title, "acme/sdk bug+enhancement");

    let raw = std::fs::read_to_string(raw_dir.join("perplexity_MCP_servers.json")).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(raw["citations"][0], "https://news.example/1");
    assert!(!raw_dir.join("perplexity_broken_query.json").exists());
}

#[test]
fn scope_queries_are_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let queries = SearchQueries::builtin();
    let search = FakeSearch::failing_on("");
    let mut collector = Collector::new(&search, FakeRepos, dir.path())
        .with_pacers(Pacer::unpaced(), Pacer::unpaced())
        .with_repos(Vec::new(), Vec::new());
    let findings = collector.collect("pricing", queries.for_scope("pricing"), "ts", now());

    assert_eq!(findings.perplexity_results.len(), 3);
    assert!(findings.errors.is_empty());
    assert_eq!(&*search.seen.borrow(), queries.for_scope("pricing"));
}
