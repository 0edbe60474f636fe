//! docsync validate
//!
//! The publication gate of the pipeline. Every check runs independently and
//! contributes findings to a [`ValidationReport`]; a single error-severity
//! finding fails the run, warnings are reported only.
//!
//! | Check | Scope | Severity |
//! |-------|-------|----------|
//! | fenced-block balance | each document | error |
//! | header spacing | each document | warning |
//! | link well-formedness | each document | error |
//! | internal link resolution | each document | warning |
//! | version consistency | VERSION vs `**Version:**` labels | error |
//! | changelog format | changelog | error / warning |
//! | secret scanning | each document | error |
//! | JSON well-formedness | output and config roots | error |

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod checks;
pub mod document;
pub mod links;
pub mod report;
pub mod secrets;
pub mod validator;

pub use document::Document;
pub use links::{extract_links, MarkdownLink};
pub use report::ValidationReport;
pub use validator::Validator;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
