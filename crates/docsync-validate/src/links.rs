//! Markdown link extraction and internal link resolution
//!
//! Links are taken from the CommonMark event stream, so link-like text inside
//! code spans and fenced blocks is not checked.

use crate::Document;
use docsync_model::ValidationFinding;
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use std::path::Path;

/// A link or image reference found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// Visible text (alt text for images)
    pub text: String,
    /// Destination as written
    pub target: String,
    /// 1-based line of the link start
    pub line: usize,
}

/// All links and images in `text`, in document order
#[must_use]
pub fn extract_links(text: &str) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    let mut open: Option<MarkdownLink> = None;

    for (event, range) in MdParser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. }) => {
                open = Some(MarkdownLink {
                    text: String::new(),
                    target: dest_url.to_string(),
                    line: crate::document::line_of(text, range.start),
                });
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(link) = open.as_mut() {
                    link.text.push_str(&t);
                }
            }
            Event::End(TagEnd::Link | TagEnd::Image) => {
                if let Some(link) = open.take() {
                    links.push(link);
                }
            }
            _ => {}
        }
    }
    links
}

/// Path part of a link target that should exist on disk
///
/// `None` for external (`http`, `https`, `mailto`) and anchor-only targets.
/// The fragment and a leading `./` or `/` are dropped.
#[must_use]
pub fn local_target(target: &str) -> Option<&str> {
    if ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| target.starts_with(scheme))
    {
        return None;
    }
    let path = target.split('#').next().unwrap_or_default();
    let path = path
        .strip_prefix("./")
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path);
    (!path.is_empty()).then_some(path)
}

/// Warnings for local links resolving neither next to `doc` nor under `root`
#[must_use]
pub fn broken_links(doc: &Document, root: &Path) -> Vec<ValidationFinding> {
    extract_links(&doc.text)
        .into_iter()
        .filter_map(|link| {
            let path = local_target(&link.target)?;
            if doc.dir().join(path).exists() || root.join(path).exists() {
                return None;
            }
            Some(ValidationFinding::warning(
                &doc.name,
                link.line,
                format!("Broken link to '{}' (text: '{}')", path, link.text),
            ))
        })
        .collect()
}
