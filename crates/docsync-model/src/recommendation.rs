//! Planned documentation changes

use crate::update::{Impact, Update};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a maintainer should do with a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// High impact: apply
    Update,
    /// Medium impact: review
    Consider,
}

/// A documentation change derived from one update
///
/// Recomputed on every run; never read back as ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The update this recommendation came from
    pub update: Update,
    /// Files to touch; never empty
    pub target_files: BTreeSet<String>,
    /// Suggested action
    pub action: Action,
    /// 1 for high impact, 2 otherwise
    pub priority: u8,
}

impl Recommendation {
    /// Derive action and priority from the update's impact
    ///
    /// Returns `None` for low-impact updates and for an empty file set.
    #[must_use]
    pub fn for_update(update: Update, target_files: BTreeSet<String>) -> Option<Self> {
        if !update.impact.is_actionable() || target_files.is_empty() {
            return None;
        }
        let (action, priority) = match update.impact {
            Impact::High => (Action::Update, 1),
            _ => (Action::Consider, 2),
        };
        Some(Self {
            update,
            target_files,
            action,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> BTreeSet<String> {
        ["INDEX.md".to_string()].into_iter().collect()
    }

    #[test]
    fn high_impact_is_update_priority_one() {
        let rec = Recommendation::for_update(Update::new("a", "b").with_impact(Impact::High), files())
            .unwrap();
        assert_eq!(rec.action, Action::Update);
        assert_eq!(rec.priority, 1);
    }

    #[test]
    fn medium_impact_is_consider_priority_two() {
        let rec = Recommendation::for_update(Update::new("a", "b"), files()).unwrap();
        assert_eq!(rec.action, Action::Consider);
        assert_eq!(rec.priority, 2);
    }

    #[test]
    fn low_impact_or_no_files_yields_nothing() {
        assert!(Recommendation::for_update(Update::new("a", "b").with_impact(Impact::Low), files())
            .is_none());
        assert!(Recommendation::for_update(Update::new("a", "b"), BTreeSet::new()).is_none());
    }
}
