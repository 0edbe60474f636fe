//! Corpus-wide validation run

use crate::document::display_name;
use crate::{checks, links, secrets, Document, ValidationReport};
use docsync_model::{PipelineConfig, ValidationFinding};
use std::path::{Path, PathBuf};

const UNREADABLE: &str = "File not found or unreadable";

/// Runs every check over the corpus described by a [`PipelineConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Validator<'a> {
    /// Create validator for `config`
    #[inline]
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Validate the corpus
    #[must_use]
    pub fn run(&self) -> ValidationReport {
        tracing::info!("Starting validation");
        let root = self.config.root.as_path();
        let mut report = ValidationReport::new();

        let mut documents = Vec::new();
        for path in self.document_paths() {
            match Document::load(root, &path) {
                Ok(doc) => {
                    tracing::info!("Validating {}", doc.name);
                    self.check_document(&doc, &mut report);
                    documents.push(doc);
                }
                Err(e) => {
                    tracing::warn!("Could not read {}: {}", path.display(), e);
                    report.push(ValidationFinding::error(
                        display_name(root, &path),
                        0,
                        UNREADABLE,
                    ));
                }
            }
        }

        let changelog_path = self.config.corpus_path(&self.config.layout.changelog);
        let changelog = documents.iter().find(|d| d.path == changelog_path);

        tracing::info!("Validating version consistency");
        let version_path = self.config.corpus_path(&self.config.layout.version);
        let expected = std::fs::read_to_string(&version_path)
            .ok()
            .map(|v| v.trim().to_string());
        report.extend(checks::version_consistency(
            expected.as_deref(),
            &display_name(root, &version_path),
            &documents,
            changelog,
        ));

        if let Some(changelog) = changelog {
            tracing::info!("Validating changelog format");
            report.extend(checks::changelog_format(changelog));
        }

        tracing::info!("Validating JSON files");
        for dir in [&self.config.output_dir, &self.config.config_dir] {
            for path in checks::json_files(dir) {
                let name = display_name(root, &path);
                match std::fs::read_to_string(&path) {
                    Ok(text) => report.extend(checks::json_well_formed(&name, &text)),
                    Err(_) => report.push(ValidationFinding::error(name, 0, UNREADABLE)),
                }
            }
        }

        tracing::info!(
            "Validation finished: {} errors, {} warnings",
            report.errors.len(),
            report.warnings.len()
        );
        report
    }

    /// Per-document checks
    fn check_document(&self, doc: &Document, report: &mut ValidationReport) {
        report.extend(checks::fence_balance(doc));
        report.extend(checks::header_spacing(doc));
        report.extend(checks::link_syntax(doc));
        report.extend(links::broken_links(doc, &self.config.root));
        report.extend(secrets::scan(doc));
    }

    /// Present core documents, then `docs/*.md` sorted by name
    fn document_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for relative in self.config.layout.core_documents() {
            let path = self.config.corpus_path(relative);
            if path.exists() {
                paths.push(path);
            } else {
                tracing::warn!("Skipping {} (not found)", relative.display());
            }
        }
        paths.extend(markdown_files(
            &self.config.corpus_path(&self.config.layout.docs_dir),
        ));
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
