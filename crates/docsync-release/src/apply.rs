//! Applying an analysis summary to the corpus
//!
//! Each artifact is updated independently. A failure on one is logged and the
//! artifact is left out of [`UpdateLog::files_updated`]; the rest still run.

use crate::{ChangelogEntry, ChangelogMerger, MetadataLabel, MetadataPatcher, ReleaseError, VersionManager};
use chrono::NaiveDate;
use docsync_model::{AnalysisSummary, PipelineConfig, UpdateLog, Version};
use std::path::{Path, PathBuf};

/// Applies summaries to the corpus described by a [`PipelineConfig`]
#[derive(Debug, Clone, Copy)]
pub struct ReleaseApplier<'a> {
    config: &'a PipelineConfig,
    versions: VersionManager,
    merger: ChangelogMerger,
}

impl<'a> ReleaseApplier<'a> {
    /// Create applier for `config`
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            versions: VersionManager::new(),
            merger: ChangelogMerger::new(),
        }
    }

    /// Apply `summary`, dating changes with `today`
    ///
    /// Returns `None` without touching any file when the summary has no
    /// updates.
    #[must_use]
    pub fn apply(
        &self,
        summary: &AnalysisSummary,
        today: NaiveDate,
        timestamp: impl Into<String>,
    ) -> Option<UpdateLog> {
        if !summary.has_updates {
            tracing::info!("No updates to apply");
            return None;
        }
        tracing::info!("Processing {} updates", summary.updates.len());

        let layout = &self.config.layout;
        let version_path = self.config.corpus_path(&layout.version);
        let current = self.versions.read(&version_path).unwrap_or_else(|e| {
            tracing::warn!("Could not read VERSION: {}", e);
            VersionManager::MISSING.to_string()
        });
        let (next, kind) = self.versions.bump(&current, summary.high_impact_count);
        tracing::info!("Version bump: {} -> {} ({})", current, next, kind);

        let mut files_updated = Vec::new();
        let mut record = |name: String, result: Result<(), ReleaseError>| match result {
            Ok(()) => {
                tracing::info!("Updated {}", name);
                files_updated.push(name);
            }
            Err(e) => tracing::warn!("Skipped {}: {}", name, e),
        };

        record(
            display_name(&layout.version),
            self.versions.write(&version_path, next),
        );

        let entry = ChangelogEntry::new(next, today, &summary.updates, summary.source_count);
        record(
            display_name(&layout.changelog),
            self.merger
                .merge_file(&self.config.corpus_path(&layout.changelog), &entry),
        );

        record(
            display_name(&layout.index),
            MetadataPatcher::index(next, today, false)
                .patch_file(&self.config.corpus_path(&layout.index))
                .map(drop),
        );

        let guide_path = self.config.corpus_path(&layout.guide);
        record(
            format!("{} (date)", display_name(&layout.guide)),
            MetadataPatcher::guide(today).patch_file(&guide_path).map(drop),
        );

        self.sync_version_labels(next);

        if summary.has_high_impact() {
            let outcome = MetadataPatcher::new()
                .set(MetadataLabel::LastMajorUpdate, crate::label_date(today))
                .patch_file(&guide_path);
            match outcome {
                Ok(o) => tracing::info!("Processed major update label ({} changed)", o.changed),
                Err(e) => tracing::warn!("Could not mark major update: {}", e),
            }
        }

        tracing::info!("Update complete. Files modified: {}", files_updated.len());
        Some(UpdateLog {
            timestamp: timestamp.into(),
            previous_version: current,
            new_version: next,
            bump_type: kind,
            files_updated,
            updates_processed: summary.updates.len(),
        })
    }

    /// Rewrite `**Version:**` in every other corpus document that carries one
    ///
    /// Covers the same documents the validator reads: the core documents
    /// other than the index, then `docs/*.md`.
    fn sync_version_labels(&self, next: Version) {
        let patcher = MetadataPatcher::new().set(MetadataLabel::Version, next.to_string());
        for path in self.labeled_documents() {
            match patcher.patch_file(&path) {
                Ok(o) if o.is_modified() => tracing::info!("Synced version label in {}", path.display()),
                Ok(_) => {}
                Err(e) => tracing::warn!("Could not sync version label in {}: {}", path.display(), e),
            }
        }
    }

    fn labeled_documents(&self) -> Vec<PathBuf> {
        let layout = &self.config.layout;
        let mut paths: Vec<PathBuf> = layout
            .core_documents()
            .into_iter()
            .filter(|relative| *relative != layout.index.as_path())
            .map(|relative| self.config.corpus_path(relative))
            .filter(|path| path.exists())
            .collect();
        paths.extend(markdown_files(&self.config.corpus_path(&layout.docs_dir)));
        paths
    }
}

fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}
