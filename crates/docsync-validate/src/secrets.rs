//! Secret scanning
//!
//! Case-insensitive patterns for credentials that should never be committed.

use crate::Document;
use docsync_model::ValidationFinding;
use once_cell::sync::Lazy;
use regex::Regex;

struct SecretPattern {
    regex: Regex,
    description: &'static str,
}

static PATTERNS: Lazy<Vec<SecretPattern>> = Lazy::new(|| {
    [
        (r"sk-[a-zA-Z0-9]{20,}", "Possible API key"),
        (r"ghp_[a-zA-Z0-9]{36}", "GitHub personal access token"),
        (r"AKIA[0-9A-Z]{16}", "AWS access key"),
        (r#"password\s*=\s*["'][^"']+["']"#, "Hardcoded password"),
        (r#"secret\s*=\s*["'][^"']+["']"#, "Hardcoded secret"),
    ]
    .into_iter()
    .map(|(pattern, description)| SecretPattern {
        regex: Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|e| unreachable!("secret pattern {pattern}: {e}")),
        description,
    })
    .collect()
});

/// One error per secret-like match, pattern by pattern
#[must_use]
pub fn scan(doc: &Document) -> Vec<ValidationFinding> {
    PATTERNS
        .iter()
        .flat_map(|p| {
            p.regex.find_iter(&doc.text).map(move |m| {
                ValidationFinding::error(
                    &doc.name,
                    doc.line_of(m.start()),
                    format!("{} detected", p.description),
                )
            })
        })
        .collect()
}
