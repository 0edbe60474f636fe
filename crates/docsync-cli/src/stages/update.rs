use super::{read_json_or_none, write_json, Clock};
use docsync_model::{AnalysisSummary, PipelineConfig, UpdateLog};
use docsync_release::ReleaseApplier;

/// Apply the persisted analysis summary to the corpus
///
/// Returns `None` when there is nothing to apply; the update log is only
/// written when a release was made.
pub(crate) fn update(config: &PipelineConfig, clock: &Clock) -> anyhow::Result<Option<UpdateLog>> {
    tracing::info!("Starting update");
    let Some(summary) =
        read_json_or_none::<AnalysisSummary>(&config.output_path(PipelineConfig::SUMMARY_FILE))
    else {
        tracing::info!("No analysis summary found");
        return Ok(None);
    };

    let Some(log) = ReleaseApplier::new(config).apply(&summary, clock.today, clock.timestamp.clone())
    else {
        return Ok(None);
    };

    write_json(&config.output_path(PipelineConfig::UPDATE_LOG_FILE), &log)?;
    tracing::info!(
        "Released {} ({} files updated)",
        log.new_version,
        log.files_updated.len()
    );
    Ok(Some(log))
}
