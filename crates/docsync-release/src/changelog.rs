//! Changelog document model and entry merging
//!
//! A changelog is parsed into the text before the insertion point, an ordered
//! list of release sections and an unparsed tail. The insertion point is the
//! first release header (`## [`) that follows a `---` separator. Documents
//! without that shape fall back to inserting right after the first `---`,
//! and documents without any separator get the entry appended.

use crate::{read_text, write_text, ChangelogError, ReleaseError};
use chrono::NaiveDate;
use docsync_model::{Category, Update, Version};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(---\s*\n+)(## \[)").unwrap_or_else(|e| unreachable!("anchor regex: {e}"))
});

static RELEASE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## \[(\d+\.\d+\.\d+)\]").unwrap_or_else(|e| unreachable!("header regex: {e}"))
});

const SEPARATOR: &str = "---";
const RELEASE_PREFIX: &str = "## [";

/// Where new entries go in a parsed changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the first release header after a separator
    BeforeFirstRelease,
    /// Right after the first `---` in the document
    AfterSeparator,
    /// At the end of the document
    Append,
}

/// One release section, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    /// Version from the section header, when it is well formed
    pub version: Option<Version>,
    /// Section text including its header line
    pub text: String,
}

impl ReleaseSection {
    fn parse(text: &str) -> Self {
        Self {
            version: header_version(text),
            text: text.to_string(),
        }
    }
}

fn header_version(line: &str) -> Option<Version> {
    RELEASE_HEADER
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A parsed changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    head: String,
    releases: Vec<ReleaseSection>,
    tail: String,
    placement: Placement,
}

impl Changelog {
    /// Parse changelog text
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if let Some(offset) = ANCHOR.captures(text).and_then(|c| c.get(2)).map(|m| m.start()) {
            let (head, rest) = text.split_at(offset);
            return Self {
                head: head.to_string(),
                releases: split_sections(rest),
                tail: String::new(),
                placement: Placement::BeforeFirstRelease,
            };
        }

        if let Some(idx) = text.find(SEPARATOR) {
            let (head, tail) = text.split_at(idx + SEPARATOR.len());
            tracing::debug!("No release anchor found, inserting after first separator");
            return Self {
                head: head.to_string(),
                releases: Vec::new(),
                tail: tail.to_string(),
                placement: Placement::AfterSeparator,
            };
        }

        tracing::debug!("No separator found, appending to changelog");
        Self {
            head: text.to_string(),
            releases: Vec::new(),
            tail: String::new(),
            placement: Placement::Append,
        }
    }

    /// Insertion strategy chosen at parse time
    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Parsed release sections, newest first
    #[inline]
    #[must_use]
    pub fn releases(&self) -> &[ReleaseSection] {
        &self.releases
    }

    /// Every well-formed release version in document order
    ///
    /// Scans the whole document, so headers outside the parsed section list
    /// (fallback layouts) are included.
    #[must_use]
    pub fn versions(&self) -> Vec<Version> {
        self.render().lines().filter_map(header_version).collect()
    }

    /// Whether a section for `version` already exists
    #[must_use]
    pub fn contains(&self, version: Version) -> bool {
        self.versions().contains(&version)
    }

    /// Insert a rendered entry for `version` above all existing releases
    ///
    /// # Errors
    /// Returns [`ChangelogError::DuplicateVersion`] if the changelog already
    /// has that version; the document is left untouched.
    pub fn insert(&mut self, version: Version, entry: &str) -> Result<(), ChangelogError> {
        if self.contains(version) {
            return Err(ChangelogError::DuplicateVersion(version));
        }
        let text = match self.placement {
            Placement::BeforeFirstRelease => entry.to_string(),
            Placement::AfterSeparator | Placement::Append => format!("\n\n{entry}"),
        };
        self.releases.insert(
            0,
            ReleaseSection {
                version: Some(version),
                text,
            },
        );
        Ok(())
    }

    /// Render back to text
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.head.len()
                + self.tail.len()
                + self.releases.iter().map(|r| r.text.len()).sum::<usize>(),
        );
        out.push_str(&self.head);
        for release in &self.releases {
            out.push_str(&release.text);
        }
        out.push_str(&self.tail);
        out
    }
}

fn split_sections(text: &str) -> Vec<ReleaseSection> {
    let mut sections = Vec::new();
    let mut current = String::new();
    for line in text.split_inclusive('\n') {
        if line.starts_with(RELEASE_PREFIX) && !current.is_empty() {
            sections.push(ReleaseSection::parse(&current));
            current.clear();
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        sections.push(ReleaseSection::parse(&current));
    }
    sections
}

/// A dated entry for one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    version: Version,
    date: NaiveDate,
    updates: Vec<Update>,
    source_count: usize,
}

impl ChangelogEntry {
    /// Heading of the added-updates block
    pub const ADDED_HEADING: &'static str = "### Added (Automated Research)";
    /// Bullet used when nothing actionable was found
    pub const PLACEHOLDER: &'static str =
        "- Automated research update (no significant changes detected)";

    /// Entry for `version`; only actionable updates are listed
    #[must_use]
    pub fn new(version: Version, date: NaiveDate, updates: &[Update], source_count: usize) -> Self {
        Self {
            version,
            date,
            updates: updates
                .iter()
                .filter(|u| u.impact.is_actionable())
                .cloned()
                .collect(),
            source_count,
        }
    }

    /// Version this entry describes
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    fn grouped(&self) -> Vec<(&Category, Vec<&Update>)> {
        let mut groups: Vec<(&Category, Vec<&Update>)> = Vec::new();
        for update in &self.updates {
            match groups.iter_mut().find(|(c, _)| **c == update.category) {
                Some((_, members)) => members.push(update),
                None => groups.push((&update.category, vec![update])),
            }
        }
        groups
    }

    /// Markdown for the entry, ending with a `---` separator line
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("## [{}] - {}", self.version, self.date.format("%Y-%m-%d")),
            String::new(),
            Self::ADDED_HEADING.to_string(),
            String::new(),
        ];

        let groups = self.grouped();
        if groups.is_empty() {
            lines.push(Self::PLACEHOLDER.to_string());
            lines.push(String::new());
        }
        for (category, members) in groups {
            lines.push(format!("#### {}", category.heading()));
            for update in members {
                let title = if update.title.is_empty() {
                    "Update"
                } else {
                    update.title.as_str()
                };
                let description = docsync_model::text::truncate_chars(&update.description, 100);
                lines.push(format!("- {title}: {description}"));
            }
            lines.push(String::new());
        }

        lines.extend([
            "### Changed".to_string(),
            String::new(),
            "- 🔄 Documentation refreshed with latest research findings".to_string(),
            format!("- 🔄 Automated update from {} sources", self.source_count),
            String::new(),
            SEPARATOR.to_string(),
            String::new(),
        ]);
        lines.join("\n")
    }
}

/// Merges entries into the changelog file on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogMerger;

impl ChangelogMerger {
    /// Create new merger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merge `entry` into existing changelog text
    ///
    /// # Errors
    /// Returns [`ChangelogError::DuplicateVersion`] when the version is
    /// already present.
    pub fn merge(&self, existing: &str, entry: &ChangelogEntry) -> Result<String, ChangelogError> {
        let mut changelog = Changelog::parse(existing);
        changelog.insert(entry.version(), &entry.render())?;
        Ok(changelog.render())
    }

    /// Merge `entry` into the changelog at `path`
    ///
    /// The file is only written when the merge succeeds.
    ///
    /// # Errors
    /// Returns an error if the file is missing or unreadable, the version is
    /// a duplicate, or the write fails.
    pub fn merge_file(&self, path: &Path, entry: &ChangelogEntry) -> Result<(), ReleaseError> {
        if !path.exists() {
            return Err(ReleaseError::NotFound(path.to_path_buf()));
        }
        let existing = read_text(path)?;
        let merged = self.merge(&existing, entry)?;
        write_text(path, &merged)?;
        tracing::info!("Added changelog entry for version {}", entry.version());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_model::Impact;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "# Changelog\n\nAll notable changes.\n\n---\n\n## [2.0.3] - 2026-01-10\n\n- Fix\n\n---\n\n## [2.0.2] - 2026-01-01\n\n- Init\n";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    #[test]
    fn parse_and_render_is_identity() {
        for text in [SAMPLE, "", "no separators here", "intro\n---\nbody\n---\nmore"] {
            assert_eq!(Changelog::parse(text).render(), text);
        }
    }

    proptest::proptest! {
        #[test]
        fn render_reproduces_any_input(text in "[-#\\[\\]0-9a-z. \n]{0,120}") {
            proptest::prop_assert_eq!(Changelog::parse(&text).render(), text);
        }
    }

    #[test]
    fn parses_release_sections() {
        let changelog = Changelog::parse(SAMPLE);
        assert_eq!(changelog.placement(), Placement::BeforeFirstRelease);
        assert_eq!(changelog.releases().len(), 2);
        assert_eq!(
            changelog.versions(),
            vec![Version::new(2, 0, 3), Version::new(2, 0, 2)]
        );
        assert!(changelog.releases()[0].text.starts_with("## [2.0.3]"));
    }

    #[test]
    fn entry_rendering() {
        let updates = vec![
            Update::new("Price cut", "Tokens are cheaper")
                .with_category(Category::Pricing)
                .with_impact(Impact::High),
            Update::new("Noise", "ignored").with_impact(Impact::Low),
        ];
        let entry = ChangelogEntry::new(Version::new(2, 0, 4), date(), &updates, 5);
        assert_eq!(
            entry.render(),
            "## [2.0.4] - 2026-01-20\n\n### Added (Automated Research)\n\n#### Pricing\n- Price cut: Tokens are cheaper\n\n### Changed\n\n- 🔄 Documentation refreshed with latest research findings\n- 🔄 Automated update from 5 sources\n\n---\n"
        );
    }

    #[test]
    fn entry_groups_by_first_appearance_and_truncates() {
        let long = "x".repeat(150);
        let updates = vec![
            Update::new("a", "one").with_category(Category::Models),
            Update::new("", &long).with_category(Category::CodeTool),
            Update::new("c", "three").with_category(Category::Models),
        ];
        let rendered = ChangelogEntry::new(Version::new(1, 0, 0), date(), &updates, 1).render();
        let models = rendered.find("#### Models").unwrap();
        let code = rendered.find("#### Code-Tool").unwrap();
        assert!(models < code);
        assert!(rendered.contains("#### Models\n- a: one\n- c: three\n"));
        assert!(rendered.contains(&format!("- Update: {}\n", "x".repeat(100))));
        assert!(!rendered.contains(&"x".repeat(101)));
    }

    #[test]
    fn empty_entry_has_placeholder() {
        let rendered = ChangelogEntry::new(Version::new(1, 0, 1), date(), &[], 0).render();
        assert!(rendered.contains(&format!(
            "{}\n\n{}\n\n### Changed",
            ChangelogEntry::ADDED_HEADING,
            ChangelogEntry::PLACEHOLDER
        )));
    }

    #[test]
    fn inserts_above_newest_release() {
        let entry = ChangelogEntry::new(Version::new(2, 0, 4), date(), &[], 3);
        let merged = ChangelogMerger::new().merge(SAMPLE, &entry).unwrap();

        let new = merged.find("## [2.0.4]").unwrap();
        let old = merged.find("## [2.0.3]").unwrap();
        assert!(new < old);
        assert!(merged.starts_with("# Changelog\n\nAll notable changes.\n\n---\n\n## [2.0.4]"));
        assert!(merged.contains("---\n## [2.0.3] - 2026-01-10"));
        assert_eq!(
            Changelog::parse(&merged).versions(),
            vec![Version::new(2, 0, 4), Version::new(2, 0, 3), Version::new(2, 0, 2)]
        );
    }

    #[test]
    fn duplicate_version_is_rejected() {
        let entry = ChangelogEntry::new(Version::new(2, 0, 3), date(), &[], 3);
        let err = ChangelogMerger::new().merge(SAMPLE, &entry).unwrap_err();
        assert_eq!(err, ChangelogError::DuplicateVersion(Version::new(2, 0, 3)));
    }

    #[test]
    fn fallback_after_first_separator() {
        let text = "intro\n---\nbody\n---\nmore";
        let entry = ChangelogEntry::new(Version::new(0, 1, 0), date(), &[], 0);
        let merged = ChangelogMerger::new().merge(text, &entry).unwrap();
        assert_eq!(
            merged,
            format!("intro\n---\n\n{}\nbody\n---\nmore", entry.render())
        );
    }

    #[test]
    fn fallback_append() {
        let text = "# Changelog";
        let entry = ChangelogEntry::new(Version::new(0, 1, 0), date(), &[], 0);
        let merged = ChangelogMerger::new().merge(text, &entry).unwrap();
        assert_eq!(merged, format!("# Changelog\n\n{}", entry.render()));
        assert_eq!(Changelog::parse(text).placement(), Placement::Append);
    }

    #[test]
    fn duplicate_detected_in_fallback_layout() {
        let text = "intro\n---\nnotes\n## [1.0.0] - 2026-01-01";
        let changelog = Changelog::parse(text);
        assert_eq!(changelog.placement(), Placement::AfterSeparator);
        assert!(changelog.contains(Version::new(1, 0, 0)));
    }

    #[test]
    fn merge_file_leaves_file_on_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, SAMPLE).unwrap();

        let entry = ChangelogEntry::new(Version::new(2, 0, 2), date(), &[], 0);
        let err = ChangelogMerger::new().merge_file(&path, &entry).unwrap_err();
        assert!(matches!(err, ReleaseError::Changelog(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);

        let missing = dir.path().join("nope.md");
        assert!(matches!(
            ChangelogMerger::new().merge_file(&missing, &entry),
            Err(ReleaseError::NotFound(_))
        ));
    }
}
