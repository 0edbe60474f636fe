//! A loaded text document

use std::path::{Path, PathBuf};

/// Document text plus the names it is reported and resolved under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Name used in findings, relative to the corpus root when possible
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
    /// Full contents
    pub text: String,
}

impl Document {
    /// Create a document
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read `path`, naming it relative to `root`
    ///
    /// # Errors
    /// Returns the IO error if the file cannot be read as UTF-8.
    pub fn load(root: &Path, path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(display_name(root, path), path, text))
    }

    /// Directory links in this document resolve against
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Lines split on `\n`, numbered from 1
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.split('\n').enumerate().map(|(i, l)| (i + 1, l))
    }

    /// 1-based line containing byte `offset`
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        line_of(&self.text, offset)
    }
}

/// 1-based line of byte `offset` in `text`
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}

/// `path` relative to `root` with `/` separators, or `path` as given
#[must_use]
pub fn display_name(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
