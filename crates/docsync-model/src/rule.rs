//! Topic rules routing updates to documentation files
//!
//! Wire format (`auto-update-rules.json`):
//!
//! ```json
//! {"topics": {"pricing": {"keywords": ["cost"], "target_files": ["docs/pricing.md"], "sections": ["## Pricing"]}}}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One keyword → target-file mapping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopicRule {
    /// Case-insensitive substrings that select this rule
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    /// Corpus-relative files the rule routes to
    #[serde(default)]
    pub target_files: BTreeSet<String>,
    /// Section headings inside the target files (informational)
    #[serde(default)]
    pub sections: BTreeSet<String>,
}

impl TopicRule {
    /// Build a rule from string slices
    #[must_use]
    pub fn new(keywords: &[&str], target_files: &[&str], sections: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            keywords: owned(keywords),
            target_files: owned(target_files),
            sections: owned(sections),
        }
    }
}

/// Whole rule configuration; topic names are unique keys
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Topic name → rule, in file order
    #[serde(default)]
    pub topics: IndexMap<String, TopicRule>,
}
