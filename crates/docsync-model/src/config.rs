//! Pipeline configuration
//!
//! Passed explicitly into every stage entry point; nothing reads ambient
//! directory constants.

use std::path::{Path, PathBuf};

/// Well-known corpus files, relative to the corpus root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    /// Main prompt/usage guide
    pub guide: PathBuf,
    /// Index page carrying the version and last-updated labels
    pub index: PathBuf,
    /// Reverse-chronological changelog
    pub changelog: PathBuf,
    /// Readme
    pub readme: PathBuf,
    /// Single-line version file
    pub version: PathBuf,
    /// Directory of companion docs
    pub docs_dir: PathBuf,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            guide: PathBuf::from("Claude-Prompt-Guide.md"),
            index: PathBuf::from("INDEX.md"),
            changelog: PathBuf::from("CHANGELOG.md"),
            readme: PathBuf::from("README.md"),
            version: PathBuf::from("VERSION"),
            docs_dir: PathBuf::from("docs"),
        }
    }
}

impl CorpusLayout {
    /// Core documents validated on every run, in report order
    #[must_use]
    pub fn core_documents(&self) -> [&Path; 4] {
        [&self.guide, &self.index, &self.changelog, &self.readme]
    }
}

/// Where a pipeline run reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Corpus root
    pub root: PathBuf,
    /// Intermediate artifacts
    pub output_dir: PathBuf,
    /// Rule and query configuration
    pub config_dir: PathBuf,
    /// Corpus file names
    pub layout: CorpusLayout,
}

impl PipelineConfig {
    /// File name of the findings artifact
    pub const FINDINGS_FILE: &'static str = "research_findings.json";
    /// File name of the analysis summary artifact
    pub const SUMMARY_FILE: &'static str = "analysis_summary.json";
    /// File name of the recommendations artifact
    pub const RECOMMENDATIONS_FILE: &'static str = "update_recommendations.json";
    /// File name of the raw summarizer response
    pub const RAW_ANALYSIS_FILE: &'static str = "raw_analysis.txt";
    /// File name of the update log artifact
    pub const UPDATE_LOG_FILE: &'static str = "update_log.json";
    /// File name of the topic rule configuration
    pub const RULES_FILE: &'static str = "auto-update-rules.json";
    /// File name of the search query configuration
    pub const QUERIES_FILE: &'static str = "search-queries.json";

    /// Default layout rooted at `root`, with `output/` and `config/` beneath it
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output_dir: root.join("output"),
            config_dir: root.join("config"),
            root,
            layout: CorpusLayout::default(),
        }
    }

    /// With output directory; relative paths resolve against the root
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.root.join(dir);
        self
    }

    /// With config directory; relative paths resolve against the root
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config_dir = self.root.join(dir);
        self
    }

    /// Path of a corpus file
    #[must_use]
    pub fn corpus_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Path of an artifact in the output directory
    #[must_use]
    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }

    /// Path of a file in the config directory
    #[must_use]
    pub fn config_path(&self, file: &str) -> PathBuf {
        self.config_dir.join(file)
    }

    /// Directory for raw search responses
    #[must_use]
    pub fn raw_responses_dir(&self) -> PathBuf {
        self.output_dir.join("raw_responses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_resolve_against_root() {
        let config = PipelineConfig::new("/corpus").with_output_dir("out");
        assert_eq!(config.output_dir, PathBuf::from("/corpus/out"));
        assert_eq!(config.config_dir, PathBuf::from("/corpus/config"));
        assert_eq!(
            config.output_path(PipelineConfig::SUMMARY_FILE),
            PathBuf::from("/corpus/out/analysis_summary.json")
        );
    }

    #[test]
    fn absolute_directories_are_kept() {
        let config = PipelineConfig::new("/corpus").with_config_dir("/etc/docsync");
        assert_eq!(config.config_dir, PathBuf::from("/etc/docsync"));
    }
}
