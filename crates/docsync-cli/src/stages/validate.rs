use docsync_model::PipelineConfig;
use docsync_validate::{ValidationReport, Validator};

/// Validate the corpus
pub(crate) fn validate(config: &PipelineConfig) -> ValidationReport {
    tracing::debug!("Corpus root: {}", config.root.display());
    Validator::new(config).run()
}
