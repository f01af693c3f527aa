use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// A source file in the Sextant semantic core.
///
/// A `SourceFile` is a snapshot: the text never changes after construction.
/// Re-analysing an edited file means building a new `SourceFile` (and a new
/// syntax tree from it).
///
/// # Fields
///
/// * `path` - The path the file was loaded from (or a virtual name like `main.rs`)
/// * `text` - The raw text content of the file
///
/// # Example
///
/// ```rust
/// use sextant_source::SourceFile;
///
/// let file = SourceFile::new("main.rs", "fn main() {}\n");
/// assert_eq!(file.location(3).to_string(), "1:4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Create a source file from in-memory text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            path: path.into(),
            text,
            line_starts,
        }
    }

    /// Load a source file from the filesystem.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let text = String::from_utf8(bytes)
            .map_err(|_| SourceError::InvalidEncoding(path.to_path_buf()))?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines in the file (an empty file has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset at which the given 0-based line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Convert a byte offset into a 1-based line/column location.
    ///
    /// Offsets past the end of the file are clamped to the last position.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Location {
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        }
    }

    /// `path:line:column` for the given offset, as used in defect messages.
    pub fn describe(&self, offset: usize) -> String {
        format!("{}:{}", self.path.display(), self.location(offset))
    }
}

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
