use super::{read_json_or_none, write_json, write_text, Clock};
use crate::cli::Credentials;
use docsync_analysis::{
    compose_content, summarize, Categorizer, RecommendationPlanner, ResponseParser, RuleStore,
};
use docsync_model::{AnalysisSummary, FindingsReport, PipelineConfig};
use docsync_research::{summarize_with_fallback, AnthropicClient, PerplexityClient, Summarizer};

const NO_FINDINGS: &str = "No research findings available";
const NO_CONTENT: &str = "No content found in research";

/// Summarizers in preference order, skipping those without credentials
fn summarizers(credentials: &Credentials) -> Vec<Box<dyn Summarizer>> {
    let mut chain: Vec<Box<dyn Summarizer>> = Vec::new();
    if let Some(key) = credentials.anthropic() {
        match AnthropicClient::new(key) {
            Ok(client) => chain.push(Box::new(client)),
            Err(e) => tracing::warn!("Anthropic client unavailable: {}", e),
        }
    }
    if let Some(key) = credentials.perplexity() {
        match PerplexityClient::new(key) {
            Ok(client) => chain.push(Box::new(client)),
            Err(e) => tracing::warn!("Perplexity client unavailable: {}", e),
        }
    }
    chain
}

/// Turn the findings artifact into a summary and recommendations
///
/// A missing findings artifact or empty findings produce an empty summary
/// rather than an error.
pub(crate) fn analyze(
    config: &PipelineConfig,
    credentials: &Credentials,
    clock: &Clock,
) -> anyhow::Result<AnalysisSummary> {
    tracing::info!("Starting analysis");
    let summary_path = config.output_path(PipelineConfig::SUMMARY_FILE);

    let Some(findings) =
        read_json_or_none::<FindingsReport>(&config.output_path(PipelineConfig::FINDINGS_FILE))
    else {
        tracing::warn!("{}", NO_FINDINGS);
        let summary = AnalysisSummary::empty(&clock.timestamp, NO_FINDINGS);
        write_json(&summary_path, &summary)?;
        return Ok(summary);
    };

    let content = compose_content(&findings);
    if content.trim().is_empty() {
        tracing::warn!("{}", NO_CONTENT);
        let summary = AnalysisSummary::empty(&clock.timestamp, NO_CONTENT);
        write_json(&summary_path, &summary)?;
        return Ok(summary);
    }

    let chain = summarizers(credentials);
    let refs: Vec<&dyn Summarizer> = chain.iter().map(AsRef::as_ref).collect();
    let response = summarize_with_fallback(&refs, &content);
    if let Err(e) = write_text(&config.output_path(PipelineConfig::RAW_ANALYSIS_FILE), &response) {
        tracing::warn!("Could not save raw analysis: {:#}", e);
    }

    let analysis = ResponseParser::new().parse_or_sentinel(&response);
    let rules = RuleStore::load_or_default(&config.config_path(PipelineConfig::RULES_FILE));
    let recommendations = RecommendationPlanner::new(Categorizer::new(&rules)).plan(&analysis.updates);
    let summary = summarize(&analysis, &findings, clock.timestamp.clone());

    write_json(&summary_path, &summary)?;
    write_json(
        &config.output_path(PipelineConfig::RECOMMENDATIONS_FILE),
        &recommendations,
    )?;

    tracing::info!(
        "Analysis complete: {} updates, {} high impact, {} recommendations",
        summary.updates.len(),
        summary.high_impact_count,
        recommendations.len()
    );
    Ok(summary)
}
