//! Summarizer response → analysis → recommendations

use docsync_analysis::{summarize, Categorizer, RecommendationPlanner, ResponseParser, RuleStore};
use docsync_model::{Action, Analysis, Category, Impact, PipelineConfig};
use docsync_test_utils::{findings_with_searches, CorpusFixture, PRICING_RESPONSE};
use pretty_assertions::assert_eq;

#[test]
fn pricing_response_routes_to_pricing_docs() {
    let analysis = ResponseParser::new().parse(PRICING_RESPONSE).unwrap();
    assert_eq!(analysis.updates.len(), 1);
    assert_eq!(analysis.updates[0].category, Category::Pricing);
    assert_eq!(analysis.updates[0].impact, Impact::High);

    let rules = RuleStore::builtin();
    let recs = RecommendationPlanner::new(Categorizer::new(&rules)).plan(&analysis.updates);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].action, Action::Update);
    assert_eq!(recs[0].priority, 1);
    assert_eq!(
        recs[0].target_files.iter().map(String::as_str).collect::<Vec<_>>(),
        ["Claude-Prompt-Guide.md", "docs/pricing-comparison-jan-2026.md"]
    );

    let summary = summarize(&analysis, &findings_with_searches(3), "ts");
    assert!(summary.has_updates);
    assert_eq!(summary.topics_found, ["pricing"]);
    assert_eq!(summary.source_count, 3);
    assert_eq!(summary.high_impact_count, 1);
}

#[test]
fn garbage_response_yields_sentinel_and_no_work() {
    let analysis = ResponseParser::new().parse_or_sentinel("I could not find anything useful.");
    assert_eq!(analysis, Analysis::parse_failed());

    let rules = RuleStore::builtin();
    let recs = RecommendationPlanner::new(Categorizer::new(&rules)).plan(&analysis.updates);
    assert!(recs.is_empty());
    assert!(!summarize(&analysis, &findings_with_searches(1), "ts").has_updates);
}

#[test]
fn rule_file_in_config_dir_overrides_builtin() {
    let fixture = CorpusFixture::empty();
    fixture.write(
        &format!("config/{}", PipelineConfig::RULES_FILE),
        r#"{"topics": {"pricing": {"keywords": ["cheaper"], "target_files": ["PRICES.md"], "sections": []}}}"#,
    );
    let config = fixture.config();

    let rules = RuleStore::load_or_default(&config.config_path(PipelineConfig::RULES_FILE));
    assert_eq!(rules.len(), 1);

    let analysis = ResponseParser::new().parse(PRICING_RESPONSE).unwrap();
    let recs = RecommendationPlanner::new(Categorizer::new(&rules)).plan(&analysis.updates);
    assert_eq!(
        recs[0].target_files.iter().map(String::as_str).collect::<Vec<_>>(),
        ["PRICES.md"]
    );
}

#[test]
fn malformed_rule_file_falls_back_to_builtin() {
    let fixture = CorpusFixture::empty();
    let path = fixture.write(&format!("config/{}", PipelineConfig::RULES_FILE), "{not json");
    assert_eq!(RuleStore::load_or_default(&path), RuleStore::builtin());
}
