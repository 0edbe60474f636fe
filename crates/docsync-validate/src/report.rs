//! Aggregated validation outcome

use docsync_model::ValidationFinding;
use std::fmt;

const RULE: &str = "============================================================";

/// Findings split by severity, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Error-severity findings
    pub errors: Vec<ValidationFinding>,
    /// Warning-severity findings
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// Empty, passing report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finding
    pub fn push(&mut self, finding: ValidationFinding) {
        if finding.is_error() {
            self.errors.push(finding);
        } else {
            self.warnings.push(finding);
        }
    }

    /// Passes iff there are no errors
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit status for this report
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }

    /// Pretty JSON rendering: `{passed, errors, warnings}`
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "passed": self.passed(),
            "errors": self.errors,
            "warnings": self.warnings,
        }))
    }
}

impl Extend<ValidationFinding> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationFinding>>(&mut self, iter: I) {
        for finding in iter {
            self.push(finding);
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{RULE}\nVALIDATION RESULTS\n{RULE}")?;
        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings ({}):", self.warnings.len())?;
            for w in &self.warnings {
                writeln!(f, "  {w}")?;
            }
        }
        if !self.errors.is_empty() {
            writeln!(f, "\nErrors ({}):", self.errors.len())?;
            for e in &self.errors {
                writeln!(f, "  {e}")?;
            }
        }
        let verdict = if self.passed() {
            "VALIDATION PASSED"
        } else {
            "VALIDATION FAILED"
        };
        write!(f, "\n{RULE}\n{verdict}\n{RULE}")
    }
}
