//! Error types for the docsync model

/// A version string that is not three dot-separated integers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Not exactly three components
    #[error("version '{input}' has {found} components, expected 3")]
    WrongComponentCount {
        /// Offending input
        input: String,
        /// Number of dot-separated components found
        found: usize,
    },

    /// A component is not a non-negative integer
    #[error("version '{input}' has non-numeric component '{component}'")]
    InvalidComponent {
        /// Offending input
        input: String,
        /// The component that failed to parse
        component: String,
    },
}

impl VersionError {
    /// Create invalid component error
    pub fn invalid_component(input: impl Into<String>, component: impl Into<String>) -> Self {
        Self::InvalidComponent {
            input: input.into(),
            component: component.into(),
        }
    }
}
