//! docsync release
//!
//! Applies an analysis to the documentation corpus: computes the next
//! version, inserts a dated changelog entry and rewrites metadata labels.
//!
//! # Documents as structures
//!
//! Target documents are parsed into small structures before they are
//! changed, then rendered back:
//!
//! - [`Changelog`]: text before the insertion point plus an ordered list of
//!   release sections, each kept verbatim.
//! - [`LabeledDocument`]: lines plus the value spans of recognised labels
//!   (`**Version:**`, `**Last Updated:**`, ...).
//!
//! Rendering an unmodified document reproduces the input byte for byte, and
//! setting a label to its current value is a no-op.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod apply;
pub mod changelog;
pub mod error;
pub mod metadata;
pub mod version;

pub use apply::ReleaseApplier;
pub use changelog::{Changelog, ChangelogEntry, ChangelogMerger, Placement, ReleaseSection};
pub use error::{ChangelogError, ReleaseError};
pub use metadata::{label_date, LabeledDocument, LabeledField, MetadataLabel, MetadataPatcher, PatchOutcome};
pub use version::VersionManager;

use std::path::Path;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read a UTF-8 file, mapping failures to [`ReleaseError::Io`]
pub(crate) fn read_text(path: &Path) -> Result<String, ReleaseError> {
    std::fs::read_to_string(path).map_err(|e| ReleaseError::io_error(path, e))
}

/// Write a UTF-8 file, mapping failures to [`ReleaseError::Io`]
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<(), ReleaseError> {
    std::fs::write(path, contents).map_err(|e| ReleaseError::io_error(path, e))
}
