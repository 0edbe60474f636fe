//! Testing utilities for docsync workspace
//!
//! Shared corpus fixtures, sample updates and summarizer responses.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use docsync_model::{
    Analysis, Category, FindingsReport, Impact, PipelineConfig, SearchResult, Update,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_VERSION: &str = "2.0.3";

pub const SAMPLE_CHANGELOG: &str = "# Changelog\n\nAll notable changes to this guide are documented here.\n\n---\n\n## [2.0.3] - 2026-01-10\n\n### Changed\n\n- Refreshed model table\n\n---\n\n## [2.0.2] - 2026-01-01\n\n### Added\n\n- Initial release\n";

pub const SAMPLE_INDEX: &str = "# Documentation Index\n\n**Version:** 2.0.3\n**Last Updated:** January 10, 2026\n**Last Major Update:** December 1, 2025\n\n- [Guide](Claude-Prompt-Guide.md)\n- [Changelog](CHANGELOG.md)\n";

pub const SAMPLE_GUIDE: &str = "# Prompt Guide\n\n## Pricing\n\nToken prices are listed per million tokens.\n\n```text\nexample prompt\n```\n\n*Last Updated: January 10, 2026*\n";

pub const SAMPLE_README: &str = "# Docs\n\nStart with the [index](INDEX.md).\n";

/// Summarizer reply containing one high-impact pricing update
pub const PRICING_RESPONSE: &str = "Here is the analysis:\n```json\n{\"summary\": \"Prices dropped\", \"updates\": [{\"title\": \"Price cut\", \"description\": \"cheaper tokens\", \"category\": \"pricing\", \"impact\": \"high\"}], \"no_updates\": false}\n```";

/// A temporary documentation corpus laid out like a real one
pub struct CorpusFixture {
    dir: TempDir,
}

impl CorpusFixture {
    /// Corpus with VERSION, CHANGELOG, INDEX, guide and README
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write("VERSION", &format!("{SAMPLE_VERSION}\n"));
        fixture.write("CHANGELOG.md", SAMPLE_CHANGELOG);
        fixture.write("INDEX.md", SAMPLE_INDEX);
        fixture.write("Claude-Prompt-Guide.md", SAMPLE_GUIDE);
        fixture.write("README.md", SAMPLE_README);
        fixture
    }

    /// Empty corpus directory
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> PipelineConfig {
        PipelineConfig::new(self.root())
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn with_doc(self, name: &str, contents: &str) -> Self {
        self.write(&format!("docs/{name}"), contents);
        self
    }

    /// Persist a findings report where the analysis stage expects it
    pub fn with_findings(self, findings: &FindingsReport) -> Self {
        let json = serde_json::to_string_pretty(findings).unwrap();
        self.write(&format!("output/{}", PipelineConfig::FINDINGS_FILE), &json);
        self
    }

    /// Persist a summarizer analysis as the summary artifact
    pub fn with_summary_json(self, json: &str) -> Self {
        self.write(&format!("output/{}", PipelineConfig::SUMMARY_FILE), json);
        self
    }
}

impl Default for CorpusFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn pricing_update() -> Update {
    Update::new("Price cut", "cheaper tokens")
        .with_category(Category::Pricing)
        .with_impact(Impact::High)
}

pub fn update(title: &str, category: Category, impact: Impact) -> Update {
    Update::new(title, format!("{title} details"))
        .with_category(category)
        .with_impact(impact)
}

pub fn analysis(updates: Vec<Update>) -> Analysis {
    Analysis {
        summary: "Test analysis".into(),
        no_updates: updates.is_empty(),
        updates,
    }
}

/// Findings with `n` search results and nothing else
pub fn findings_with_searches(n: usize) -> FindingsReport {
    FindingsReport {
        timestamp: "2026-01-20T10:00:00".into(),
        scope: "all".into(),
        perplexity_results: (0..n)
            .map(|i| SearchResult {
                query: format!("query {i}"),
                response: format!("answer {i}"),
                citations: vec![],
            })
            .collect(),
        ..FindingsReport::default()
    }
}
