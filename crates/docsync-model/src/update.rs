//! Structured updates extracted from research findings
//!
//! An [`Update`] is produced only by the response parser and never mutated
//! afterwards. Category and impact come from an external model, so both
//! deserialize leniently: unknown categories are kept verbatim and a missing
//! impact defaults to [`Impact::Medium`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Topic category of an update
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    /// Model releases and capabilities
    Models,
    /// Coding-assistant tooling (CLI, terminal)
    CodeTool,
    /// Context/tool protocol ecosystem
    Protocol,
    /// Prices and token costs
    Pricing,
    /// Skills and marketplaces
    Skills,
    /// Third-party ecosystem tools
    Ecosystem,
    /// Anything else
    #[default]
    General,
    /// A category string this build does not know about, kept verbatim
    Other(String),
}

impl Category {
    /// Canonical wire name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Models => "models",
            Self::CodeTool => "code-tool",
            Self::Protocol => "protocol",
            Self::Pricing => "pricing",
            Self::Skills => "skills",
            Self::Ecosystem => "ecosystem",
            Self::General => "general",
            Self::Other(raw) => raw,
        }
    }

    /// Heading used for the category inside a changelog entry
    ///
    /// Words separated by `_`, `-` or spaces are capitalised individually,
    /// so `code-tool` renders as `Code-Tool`.
    #[must_use]
    pub fn heading(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut out = String::with_capacity(spaced.len());
        let mut at_word_start = true;
        for ch in spaced.chars() {
            if ch.is_alphabetic() {
                if at_word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.extend(ch.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(ch);
                at_word_start = true;
            }
        }
        out
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "models" => Self::Models,
            "code-tool" | "claude-code" => Self::CodeTool,
            "protocol" | "mcp" => Self::Protocol,
            "pricing" => Self::Pricing,
            "skills" => Self::Skills,
            "ecosystem" => Self::Ecosystem,
            "general" | "" => Self::General,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Severity of an update; controls whether it is actioned at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Actioned with priority 1
    High,
    /// Considered with priority 2
    #[default]
    Medium,
    /// Never actioned
    Low,
}

impl Impact {
    /// Whether updates of this impact produce documentation work
    #[inline]
    #[must_use]
    pub fn is_actionable(self) -> bool {
        self != Self::Low
    }
}

/// One structured, categorized fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Short headline
    #[serde(default)]
    pub title: String,
    /// What changed
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD` or `recent`
    #[serde(default = "default_date")]
    pub date: String,
    /// Topic category
    #[serde(default)]
    pub category: Category,
    /// Severity
    #[serde(default)]
    pub impact: Impact,
    /// Source URL, when the model supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_date() -> String {
    "recent".to_string()
}

impl Update {
    /// Create an update with the given headline and description
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: default_date(),
            category: Category::General,
            impact: Impact::Medium,
            source: None,
        }
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// With impact
    #[inline]
    #[must_use]
    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }

    /// Text searched by keyword rules: `title + " " + description`
    #[must_use]
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Result of analysing one batch of findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Short prose summary
    #[serde(default)]
    pub summary: String,
    /// Updates in the order the model reported them
    #[serde(default)]
    pub updates: Vec<Update>,
    /// Upstream claim that nothing changed; never trusted on its own
    #[serde(default = "default_no_updates")]
    pub no_updates: bool,
}

fn default_no_updates() -> bool {
    true
}

impl Analysis {
    /// Summary text of the parse-failure sentinel
    pub const PARSE_FAILED: &'static str = "Analysis parsing failed";

    /// The fixed value returned when a response cannot be parsed
    #[must_use]
    pub fn parse_failed() -> Self {
        Self::empty(Self::PARSE_FAILED)
    }

    /// An analysis with no updates and the given summary
    #[must_use]
    pub fn empty(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            updates: Vec::new(),
            no_updates: true,
        }
    }

    /// Whether there is real work: the flag says so *and* at least one
    /// update is above low impact
    #[must_use]
    pub fn has_actionable_updates(&self) -> bool {
        !self.no_updates && self.updates.iter().any(|u| u.impact.is_actionable())
    }

    /// Number of updates with the given impact
    #[must_use]
    pub fn count_impact(&self, impact: Impact) -> usize {
        self.updates.iter().filter(|u| u.impact == impact).count()
    }
}
