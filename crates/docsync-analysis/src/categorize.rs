//! Keyword routing of updates to documentation files
//!
//! Matching is case-insensitive substring search over
//! `title + " " + description`, not word matching: a keyword that happens to
//! sit inside an unrelated word still matches.

use crate::rules::RuleStore;
use docsync_model::Update;
use std::collections::BTreeSet;

/// Maps an update to the set of files it concerns
#[derive(Debug, Clone, Copy)]
pub struct Categorizer<'a> {
    rules: &'a RuleStore,
}

impl<'a> Categorizer<'a> {
    /// Create a categorizer over a rule store
    #[inline]
    #[must_use]
    pub fn new(rules: &'a RuleStore) -> Self {
        Self { rules }
    }

    /// Topics with at least one keyword in the update, in rule order
    #[must_use]
    pub fn matched_topics(&self, update: &Update) -> Vec<&'a str> {
        let haystack = update.haystack().to_lowercase();
        self.rules
            .topics()
            .filter(|(_, rule)| {
                rule.keywords
                    .iter()
                    .any(|kw| haystack.contains(&kw.to_lowercase()))
            })
            .map(|(topic, _)| topic)
            .collect()
    }

    /// Union of `target_files` over every matching rule; empty when none match
    #[must_use]
    pub fn target_files(&self, update: &Update) -> BTreeSet<String> {
        self.matched_topics(update)
            .into_iter()
            .filter_map(|topic| self.rules.get(topic))
            .flat_map(|rule| rule.target_files.iter().cloned())
            .collect()
    }
}
