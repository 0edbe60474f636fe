//! Recommendation planning
//!
//! Filters updates down to actionable ones and orders them for review.
//! Equal-priority recommendations keep the order the summarizer reported
//! them in.

use crate::categorize::Categorizer;
use docsync_model::{Recommendation, Update};

/// Turns updates into prioritized file-update recommendations
#[derive(Debug, Clone, Copy)]
pub struct RecommendationPlanner<'a> {
    categorizer: Categorizer<'a>,
}

impl<'a> RecommendationPlanner<'a> {
    /// Create a planner routing through `categorizer`
    #[inline]
    #[must_use]
    pub fn new(categorizer: Categorizer<'a>) -> Self {
        Self { categorizer }
    }

    /// Plan recommendations for `updates`
    ///
    /// Low-impact updates and updates no rule routes anywhere are skipped.
    /// All priority-1 entries precede all priority-2 entries.
    #[must_use]
    pub fn plan(&self, updates: &[Update]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = updates
            .iter()
            .filter(|u| u.impact.is_actionable())
            .filter_map(|u| {
                let files = self.categorizer.target_files(u);
                if files.is_empty() {
                    tracing::debug!("No rule matched update '{}'", u.title);
                }
                Recommendation::for_update(u.clone(), files)
            })
            .collect();
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }
}
