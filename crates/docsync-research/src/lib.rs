//! docsync research
//!
//! Blocking clients for the external services the pipeline talks to, and the
//! collector that turns one research run into a [`FindingsReport`].
//!
//! | Service | Trait | Client |
//! |---------|-------|--------|
//! | Web search with citations | [`SearchApi`], [`Summarizer`] | [`PerplexityClient`] |
//! | Messages API | [`Summarizer`] | [`AnthropicClient`] |
//! | Source hosting | [`RepoApi`] | [`GitHubClient`] |
//!
//! Every call is independent: a failure is logged, recorded where the
//! artifact has room for it, and the run continues with partial data.
//!
//! [`FindingsReport`]: docsync_model::FindingsReport

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod anthropic;
pub mod collector;
pub mod error;
pub mod github;
pub mod pacing;
pub mod perplexity;
pub mod prompts;
pub mod queries;
pub mod summarize;

pub use anthropic::AnthropicClient;
pub use collector::{raw_response_name, Collector};
pub use error::ClientError;
pub use github::{GitHubClient, RepoApi};
pub use pacing::Pacer;
pub use perplexity::{PerplexityClient, SearchApi, SearchResponse};
pub use queries::{SearchQueries, DEFAULT_SCOPE};
pub use summarize::{summarize_with_fallback, Summarizer, NO_API_RESPONSE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
