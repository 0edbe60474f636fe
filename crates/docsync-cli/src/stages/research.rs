use super::{write_json, Clock};
use crate::cli::Credentials;
use docsync_model::{FindingsReport, PipelineConfig};
use docsync_research::{Collector, GitHubClient, PerplexityClient, SearchQueries};

const NO_SEARCH_KEY: &str = "PERPLEXITY_API_KEY not set";

/// Collect findings and persist them as the findings artifact
///
/// Without a search key the artifact is still written, carrying only the
/// reason, so the analysis stage has something to read.
pub(crate) fn research(
    config: &PipelineConfig,
    credentials: &Credentials,
    clock: &Clock,
) -> anyhow::Result<FindingsReport> {
    tracing::info!("Starting research (scope: {})", credentials.scope);

    let findings = match credentials.perplexity() {
        None => {
            tracing::error!("{}", NO_SEARCH_KEY);
            FindingsReport::unavailable(&clock.timestamp, NO_SEARCH_KEY)
        }
        Some(key) => {
            let queries = SearchQueries::load_or_default(&config.config_path(PipelineConfig::QUERIES_FILE));
            let search = PerplexityClient::new(key)?;
            let repos = GitHubClient::new(credentials.github_token.as_deref())?;
            Collector::new(search, repos, config.raw_responses_dir()).collect(
                &credentials.scope,
                queries.for_scope(&credentials.scope),
                clock.timestamp.clone(),
                clock.now,
            )
        }
    };

    let path = config.output_path(PipelineConfig::FINDINGS_FILE);
    write_json(&path, &findings)?;
    tracing::info!("Findings saved to {}", path.display());
    Ok(findings)
}
