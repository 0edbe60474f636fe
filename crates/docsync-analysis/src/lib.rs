//! docsync analysis
//!
//! Turns the free-text answer of an external summarizer into structured
//! updates and routes each update to the documentation files it concerns.
//!
//! # Flow
//!
//! ```text
//! findings ──► compose_content ──► (external summarizer) ──► ResponseParser ──► Analysis
//!                                                                                 │
//!                         RuleStore ──► Categorizer ──► RecommendationPlanner ◄───┘
//!                                                               │
//!                                                               ▼
//!                                                      Vec<Recommendation>
//! ```
//!
//! # Example
//!
//! ```rust
//! use docsync_analysis::{Categorizer, RecommendationPlanner, ResponseParser, RuleStore};
//!
//! let analysis = ResponseParser::new().parse_or_sentinel(
//!     "```json\n{\"summary\": \"s\", \"updates\": [{\"title\": \"Price cut\", \"description\": \"cheaper tokens\", \"impact\": \"high\"}], \"no_updates\": false}\n```",
//! );
//! let rules = RuleStore::builtin();
//! let planner = RecommendationPlanner::new(Categorizer::new(&rules));
//! let recommendations = planner.plan(&analysis.updates);
//! assert_eq!(recommendations[0].priority, 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod categorize;
pub mod error;
pub mod findings;
pub mod planner;
pub mod response;
pub mod rules;

pub use categorize::Categorizer;
pub use error::{ResponseError, RuleError};
pub use findings::{compose_content, summarize, CONTENT_SEPARATOR};
pub use planner::RecommendationPlanner;
pub use response::ResponseParser;
pub use rules::RuleStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
