//! Per-document and cross-document structural checks

use crate::Document;
use docsync_model::text::truncate_chars;
use docsync_model::{ValidationFinding, Version};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| unreachable!("check pattern {pattern}: {e}"))
}

static HEADER_WITHOUT_SPACE: Lazy<Regex> = Lazy::new(|| compile(r"^#{1,6}[^#\s]"));
static COMPLETE_LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]*)\]\(([^\)]*)\)"));
static PARTIAL_LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]*)\]\([^\)]*$"));
static VERSION_LABEL: Lazy<Regex> = Lazy::new(|| compile(r"\*\*Version:\*\*\s*(\d+\.\d+\.\d+)"));
static CHANGELOG_HEADER: Lazy<Regex> =
    Lazy::new(|| compile(r"^## \[(\d+\.\d+\.\d+)\] - (\d{4}-\d{2}-\d{2})"));

const FENCE: &str = "```";
const RELEASE_PREFIX: &str = "## [";
const PREVIEW_CHARS: usize = 50;

/// Error when the number of fence markers is odd
#[must_use]
pub fn fence_balance(doc: &Document) -> Option<ValidationFinding> {
    let count = doc.text.matches(FENCE).count();
    (count % 2 != 0).then(|| {
        ValidationFinding::error(
            &doc.name,
            0,
            format!("Unclosed code block (found {count} ``` markers)"),
        )
    })
}

/// Warning per header line with no space after the hashes
#[must_use]
pub fn header_spacing(doc: &Document) -> Vec<ValidationFinding> {
    doc.numbered_lines()
        .filter(|(_, line)| HEADER_WITHOUT_SPACE.is_match(line))
        .map(|(n, line)| {
            ValidationFinding::warning(
                &doc.name,
                n,
                format!(
                    "Header missing space after #: '{}...'",
                    truncate_chars(line, PREVIEW_CHARS)
                ),
            )
        })
        .collect()
}

/// Error per line with an opened `[text](` that never closes
#[must_use]
pub fn link_syntax(doc: &Document) -> Vec<ValidationFinding> {
    doc.numbered_lines()
        .filter(|(_, line)| line.contains('[') && line.contains('('))
        .filter(|(_, line)| PARTIAL_LINK.is_match(line) && !COMPLETE_LINK.is_match(line))
        .map(|(n, line)| {
            ValidationFinding::error(
                &doc.name,
                n,
                format!(
                    "Possible unclosed link: '{}...'",
                    truncate_chars(line, PREVIEW_CHARS)
                ),
            )
        })
        .collect()
}

/// Compare VERSION against `**Version:**` labels and the changelog
///
/// `expected` is the trimmed VERSION content, `None` when the file is
/// missing. Documents without a label are not checked.
#[must_use]
pub fn version_consistency(
    expected: Option<&str>,
    version_name: &str,
    documents: &[Document],
    changelog: Option<&Document>,
) -> Vec<ValidationFinding> {
    let Some(expected) = expected else {
        return vec![ValidationFinding::error(
            version_name,
            0,
            "VERSION file not found",
        )];
    };

    let mut findings: Vec<ValidationFinding> = documents
        .iter()
        .filter_map(|doc| {
            let caps = VERSION_LABEL.captures(&doc.text)?;
            let found = caps.get(1)?;
            (found.as_str() != expected).then(|| {
                ValidationFinding::error(
                    &doc.name,
                    doc.line_of(found.start()),
                    format!(
                        "Version mismatch: found {}, expected {}",
                        found.as_str(),
                        expected
                    ),
                )
            })
        })
        .collect();

    if let Some(changelog) = changelog {
        if !changelog.text.contains(&format!("## [{expected}]")) {
            findings.push(ValidationFinding::warning(
                &changelog.name,
                0,
                format!("No changelog entry for version {expected}"),
            ));
        }
    }
    findings
}

/// Header format errors and out-of-order warnings for the changelog
#[must_use]
pub fn changelog_format(doc: &Document) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    let mut versions: Vec<(usize, Version)> = Vec::new();

    for (n, line) in doc.numbered_lines() {
        if !line.starts_with(RELEASE_PREFIX) {
            continue;
        }
        let parsed = CHANGELOG_HEADER
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<Version>().ok());
        match parsed {
            Some(version) => versions.push((n, version)),
            None => findings.push(ValidationFinding::error(
                &doc.name,
                n,
                format!("Malformed version header: '{line}'"),
            )),
        }
    }

    for pair in versions.windows(2) {
        let (_, newer) = pair[0];
        let (line, older) = pair[1];
        if newer < older {
            findings.push(ValidationFinding::warning(
                &doc.name,
                line,
                format!("Versions out of order: {newer} appears before {older}"),
            ));
        }
    }
    findings
}

/// Error when `text` is not valid JSON, at the parser's reported line
#[must_use]
pub fn json_well_formed(name: &str, text: &str) -> Option<ValidationFinding> {
    let err = serde_json::from_str::<serde_json::Value>(text).err()?;
    let rendered = err.to_string();
    let message = rendered.split(" at line ").next().unwrap_or(&rendered);
    Some(ValidationFinding::error(
        name,
        err.line(),
        format!("Invalid JSON: {message}"),
    ))
}

/// `*.json` files directly inside `dir`, sorted by name
#[must_use]
pub fn json_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::new("doc.md", "doc.md", text)
    }

    #[test]
    fn odd_fences_are_an_error() {
        let finding = fence_balance(&doc("```\ncode\n```\n```\n")).unwrap();
        assert!(finding.is_error());
        assert_eq!(finding.line, 0);
        assert_eq!(finding.message, "Unclosed code block (found 3 ``` markers)");
        assert!(fence_balance(&doc("```\ncode\n```\n")).is_none());
    }

    #[test]
    fn header_spacing_warnings() {
        let findings = header_spacing(&doc("# Good\n##Bad\n####### seven\n#\n"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].message, "Header missing space after #: '##Bad...'");
        assert!(!findings[0].is_error());
    }

    #[test]
    fn unclosed_links() {
        let findings = link_syntax(&doc("[ok](a.md)\n[broken](b.md\nplain (text) [x]\n"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert!(findings[0].is_error());
    }

    #[test]
    fn complete_link_on_same_line_suppresses_partial() {
        assert!(link_syntax(&doc("[a](x.md) then [b](y.md")).is_empty());
    }

    #[test]
    fn version_mismatch_is_an_error() {
        let docs = vec![
            Document::new("INDEX.md", "INDEX.md", "\n**Version:** 2.0.2\n"),
            Document::new("README.md", "README.md", "no label"),
        ];
        let changelog = Document::new("CHANGELOG.md", "CHANGELOG.md", "## [2.0.3] - 2026-01-01");
        let findings = version_consistency(Some("2.0.3"), "VERSION", &docs, Some(&changelog));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, "INDEX.md");
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].message, "Version mismatch: found 2.0.2, expected 2.0.3");
    }

    #[test]
    fn missing_version_file_and_changelog_entry() {
        let findings = version_consistency(None, "VERSION", &[], None);
        assert_eq!(findings[0].message, "VERSION file not found");
        assert!(findings[0].is_error());

        let changelog = Document::new("CHANGELOG.md", "CHANGELOG.md", "## [1.0.0] - 2026-01-01");
        let findings = version_consistency(Some("1.0.1"), "VERSION", &[], Some(&changelog));
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_error());
    }

    #[test]
    fn changelog_headers() {
        let text = "# Changelog\n## [2.0.3] - 2026-01-10\n## [Unreleased]\n## [2.0.4] - 2026-01-11\n## [1.0.0] - 2025-12-01\n";
        let findings = changelog_format(&doc(text));
        assert_eq!(findings.len(), 2);
        assert!(findings[0].is_error());
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[0].message, "Malformed version header: '## [Unreleased]'");
        assert!(!findings[1].is_error());
        assert_eq!(
            findings[1].message,
            "Versions out of order: 2.0.3 appears before 2.0.4"
        );
    }

    #[test]
    fn numeric_version_order() {
        let text = "## [2.0.10] - 2026-01-10\n## [2.0.9] - 2026-01-01\n";
        assert!(changelog_format(&doc(text)).is_empty());
    }

    #[test]
    fn invalid_json_reports_line() {
        let finding = json_well_formed("output/x.json", "{\n  \"a\": 1,\n  \"b\": \n}").unwrap();
        assert_eq!(finding.line, 4);
        assert!(finding.message.starts_with("Invalid JSON: "));
        assert!(!finding.message.contains(" at line "));
        assert!(json_well_formed("ok.json", "{\"a\": [1, 2]}").is_none());
    }

    #[test]
    fn json_files_are_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();
        let names: Vec<String> = json_files(dir.path())
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
        assert!(json_files(&dir.path().join("missing")).is_empty());
    }
}
