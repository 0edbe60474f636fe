use assert_cmd::Command;
use docsync_test_utils::{findings_with_searches, CorpusFixture};
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn cmd(fixture: &CorpusFixture) -> Command {
    let mut cmd = Command::cargo_bin("docsync").unwrap();
    cmd.arg("--root")
        .arg(fixture.root())
        .env_remove("PERPLEXITY_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("SEARCH_SCOPE")
        .env_remove("RUST_LOG");
    cmd
}

fn read_json(fixture: &CorpusFixture, relative: &str) -> Value {
    serde_json::from_str(&fixture.read(relative)).unwrap()
}

#[test]
fn validate_passes_on_clean_corpus() {
    let fixture = CorpusFixture::new();
    cmd(&fixture)
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("VALIDATION PASSED"));
}

#[test]
fn validate_fails_on_unbalanced_fence() {
    let fixture = CorpusFixture::new().with_doc("broken.md", "# Broken\n\n```rust\nfn main() {}\n");
    cmd(&fixture)
        .arg("validate")
        .assert()
        .code(1)
        .stdout(contains("VALIDATION FAILED"))
        .stdout(contains("docs/broken.md"));
}

#[test]
fn validate_json_report() {
    let fixture = CorpusFixture::new();
    fixture.write("VERSION", "9.9.9\n");
    let out = cmd(&fixture)
        .args(["--json", "validate"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["passed"], false);
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn research_without_key_still_writes_findings() {
    let fixture = CorpusFixture::new();
    cmd(&fixture).arg("research").assert().success();
    let findings = read_json(&fixture, "output/research_findings.json");
    assert_eq!(findings["scope"], "none");
    assert_eq!(findings["errors"][0], "PERPLEXITY_API_KEY not set");
}

#[test]
fn analyze_without_findings_writes_empty_summary() {
    let fixture = CorpusFixture::new();
    cmd(&fixture).arg("analyze").assert().success();
    let summary = read_json(&fixture, "output/analysis_summary.json");
    assert_eq!(summary["summary"], "No research findings available");
    assert_eq!(summary["has_updates"], false);
}

#[test]
fn analyze_without_keys_falls_back_to_no_api() {
    let fixture = CorpusFixture::new().with_findings(&findings_with_searches(2));
    cmd(&fixture).arg("analyze").assert().success();

    let summary = read_json(&fixture, "output/analysis_summary.json");
    assert_eq!(summary["summary"], "No API available");
    assert_eq!(summary["has_updates"], false);
    assert_eq!(summary["source_count"], 2);
    assert!(fixture.read("output/raw_analysis.txt").contains("No API available"));
    assert_eq!(read_json(&fixture, "output/update_recommendations.json"), Value::Array(vec![]));
}

#[test]
fn analyze_continues_when_raw_analysis_is_unwritable() {
    let fixture = CorpusFixture::new().with_findings(&findings_with_searches(2));
    fixture.write("output/raw_analysis.txt/occupied", "");
    cmd(&fixture).arg("analyze").assert().success();

    let summary = read_json(&fixture, "output/analysis_summary.json");
    assert_eq!(summary["summary"], "No API available");
    assert_eq!(read_json(&fixture, "output/update_recommendations.json"), Value::Array(vec![]));
}

#[test]
fn update_applies_persisted_summary() {
    let fixture = CorpusFixture::new().with_summary_json(
        r#"{
            "timestamp": "2026-01-20T10:00:00",
            "has_updates": true,
            "summary": "Prices dropped",
            "topics_found": ["pricing"],
            "source_count": 3,
            "updates": [{"title": "Price cut", "description": "cheaper tokens", "category": "pricing", "impact": "high"}],
            "high_impact_count": 1,
            "medium_impact_count": 0
        }"#,
    );
    cmd(&fixture)
        .arg("update")
        .assert()
        .success()
        .stdout(contains("2.0.3 -> 2.0.4"));

    assert_eq!(fixture.read("VERSION"), "2.0.4\n");
    assert!(fixture.read("CHANGELOG.md").contains("- Price cut: cheaper tokens"));
    let log = read_json(&fixture, "output/update_log.json");
    assert_eq!(log["new_version"], "2.0.4");
    assert_eq!(log["bump_type"], "patch");
    assert_eq!(log["updates_processed"], 1);
}

#[test]
fn update_without_summary_is_a_no_op() {
    let fixture = CorpusFixture::new();
    cmd(&fixture)
        .arg("update")
        .assert()
        .success()
        .stdout(contains("No updates to apply"));
    assert_eq!(fixture.read("VERSION"), "2.0.3\n");
    assert!(!fixture.path("output/update_log.json").exists());
}

#[test]
fn run_without_keys_leaves_corpus_valid() {
    let fixture = CorpusFixture::new();
    cmd(&fixture)
        .arg("run")
        .assert()
        .success()
        .stdout(contains("VALIDATION PASSED"));
    assert_eq!(fixture.read("VERSION"), "2.0.3\n");
}

#[test]
fn run_validates_after_a_failed_stage() {
    let fixture = CorpusFixture::new();
    fixture.write("output/research_findings.json/occupied", "");
    cmd(&fixture)
        .arg("run")
        .assert()
        .success()
        .stdout(contains("VALIDATION PASSED"))
        .stderr(contains("Research stage failed"));

    let summary = read_json(&fixture, "output/analysis_summary.json");
    assert_eq!(summary["summary"], "No research findings available");
}
