//! Metadata labels inside corpus documents
//!
//! Only the value span of a recognised label is ever rewritten; every other
//! byte of the document is preserved.

use crate::{read_text, write_text, ReleaseError};
use chrono::NaiveDate;
use docsync_model::Version;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

const MONTH_DATE: &str = r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d+,\s+\d{4}";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| unreachable!("label regex {pattern}: {e}"))
}

static VERSION_LABEL: Lazy<Regex> =
    Lazy::new(|| compile(r"\*\*Version:\*\*\s*(?P<value>\d+\.\d+\.\d+)"));

static LAST_UPDATED_LABEL: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\*\*Last Updated:\*\*\s*(?P<value>{MONTH_DATE})")));

static LAST_UPDATED_FOOTER: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\*Last Updated:\s*(?P<value>{MONTH_DATE})\*")));

static LAST_MAJOR_UPDATE_LABEL: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\*\*Last Major Update:\*\*\s*(?P<value>{MONTH_DATE})")));

/// Format a date the way metadata labels show it, e.g. `January 05, 2026`
#[must_use]
pub fn label_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// A recognised metadata label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataLabel {
    /// `**Version:** x.y.z`
    Version,
    /// `**Last Updated:** Month D, YYYY`
    LastUpdated,
    /// `*Last Updated: Month D, YYYY*` footer line
    LastUpdatedFooter,
    /// `**Last Major Update:** Month D, YYYY`
    LastMajorUpdate,
}

impl MetadataLabel {
    /// Every label, in scan order
    pub const ALL: [Self; 4] = [
        Self::Version,
        Self::LastUpdated,
        Self::LastUpdatedFooter,
        Self::LastMajorUpdate,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Version => &VERSION_LABEL,
            Self::LastUpdated => &LAST_UPDATED_LABEL,
            Self::LastUpdatedFooter => &LAST_UPDATED_FOOTER,
            Self::LastMajorUpdate => &LAST_MAJOR_UPDATE_LABEL,
        }
    }
}

impl fmt::Display for MetadataLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Version => "Version",
            Self::LastUpdated => "Last Updated",
            Self::LastUpdatedFooter => "Last Updated (footer)",
            Self::LastMajorUpdate => "Last Major Update",
        };
        f.write_str(name)
    }
}

/// One label occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    /// Which label
    pub label: MetadataLabel,
    /// 1-based line number
    pub line: usize,
    /// Current value
    pub value: String,
}

/// A document viewed as lines carrying labeled fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    lines: Vec<String>,
}

impl LabeledDocument {
    /// Split `text` into lines, keeping terminators
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// All label occurrences in document order
    #[must_use]
    pub fn fields(&self) -> Vec<LabeledField> {
        let mut fields = Vec::new();
        for (idx, line) in self.lines.iter().enumerate() {
            for label in MetadataLabel::ALL {
                for caps in label.pattern().captures_iter(line) {
                    if let Some(value) = caps.name("value") {
                        fields.push(LabeledField {
                            label,
                            line: idx + 1,
                            value: value.as_str().to_string(),
                        });
                    }
                }
            }
        }
        fields
    }

    /// First value of `label`, if present
    #[must_use]
    pub fn value(&self, label: MetadataLabel) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|f| f.label == label)
            .map(|f| f.value)
    }

    /// Set every occurrence of `label` to `value`
    ///
    /// Returns `(matched, changed)`: occurrences found and occurrences whose
    /// value actually differed.
    pub fn set(&mut self, label: MetadataLabel, value: &str) -> (usize, usize) {
        let pattern = label.pattern();
        let mut matched = 0;
        let mut changed = 0;
        for line in &mut self.lines {
            let mut rebuilt = String::with_capacity(line.len());
            let mut last = 0;
            for caps in pattern.captures_iter(line) {
                let Some(span) = caps.name("value") else {
                    continue;
                };
                matched += 1;
                if span.as_str() != value {
                    changed += 1;
                }
                rebuilt.push_str(&line[last..span.start()]);
                rebuilt.push_str(value);
                last = span.end();
            }
            if last > 0 {
                rebuilt.push_str(&line[last..]);
                *line = rebuilt;
            }
        }
        (matched, changed)
    }

    /// Render back to text
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

/// Result of patching one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Patched text
    pub text: String,
    /// Label occurrences found
    pub matched: usize,
    /// Label occurrences whose value changed
    pub changed: usize,
}

impl PatchOutcome {
    /// Whether any byte changed
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.changed > 0
    }
}

/// A set of label assignments applied to documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataPatcher {
    assignments: Vec<(MetadataLabel, String)>,
}

impl MetadataPatcher {
    /// Create empty patcher
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment
    #[must_use]
    pub fn set(mut self, label: MetadataLabel, value: impl Into<String>) -> Self {
        self.assignments.push((label, value.into()));
        self
    }

    /// Assignments for the index page
    ///
    /// `**Last Major Update:**` is only touched when `major` is set.
    #[must_use]
    pub fn index(version: Version, date: NaiveDate, major: bool) -> Self {
        let label = label_date(date);
        let patcher = Self::new()
            .set(MetadataLabel::Version, version.to_string())
            .set(MetadataLabel::LastUpdated, label.clone());
        if major {
            patcher.set(MetadataLabel::LastMajorUpdate, label)
        } else {
            patcher
        }
    }

    /// Assignments for the guide footer
    #[must_use]
    pub fn guide(date: NaiveDate) -> Self {
        Self::new().set(MetadataLabel::LastUpdatedFooter, label_date(date))
    }

    /// Apply assignments to `text`
    #[must_use]
    pub fn patch_text(&self, text: &str) -> PatchOutcome {
        let mut document = LabeledDocument::parse(text);
        let mut matched = 0;
        let mut changed = 0;
        for (label, value) in &self.assignments {
            let (m, c) = document.set(*label, value);
            if m == 0 {
                tracing::debug!("Label '{}' not present", label);
            }
            matched += m;
            changed += c;
        }
        PatchOutcome {
            text: document.render(),
            matched,
            changed,
        }
    }

    /// Apply assignments to the file at `path`, writing only on change
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or unwritable.
    pub fn patch_file(&self, path: &Path) -> Result<PatchOutcome, ReleaseError> {
        if !path.exists() {
            return Err(ReleaseError::NotFound(path.to_path_buf()));
        }
        let outcome = self.patch_text(&read_text(path)?);
        if outcome.is_modified() {
            write_text(path, &outcome.text)?;
        }
        tracing::debug!(
            "Patched {}: {} labels matched, {} changed",
            path.display(),
            outcome.matched,
            outcome.changed
        );
        Ok(outcome)
    }
}
