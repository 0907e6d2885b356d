//! Source files and byte-offset to line mapping.

use crate::error::SourceError;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Byte spans of each line, in order. A span excludes its `\n`; the check
/// in [`LineTable::line_of`] is inclusive on both ends, so the newline byte
/// maps to the line it terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    spans: Vec<Range<usize>>,
}

impl LineTable {
    pub fn new(src: &str) -> Self {
        let mut spans = Vec::new();
        let mut start = 0;
        for line in src.split('\n') {
            let end = start + line.len();
            spans.push(start..end);
            start = end + 1;
        }
        LineTable { spans }
    }

    /// 1-based line of `offset`; the first matching line wins. `None` when
    /// the offset lies past the end of the source.
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        self.spans
            .iter()
            .position(|s| offset >= s.start && offset <= s.end)
            .map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// An immutable, loaded source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    name: String,
    src: String,
    lines: LineTable,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, src: impl Into<String>) -> Self {
        let path = path.into();
        let src = src.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let lines = LineTable::new(&src);
        SourceFile {
            path,
            name,
            src,
            lines,
        }
    }

    /// Read `path` from disk.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let src = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(SourceFile::new(path, src))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    pub fn line_of(&self, offset: usize) -> Option<usize> {
        self.lines.line_of(offset)
    }

    /// Source text of `span`, clamped to the file and to char boundaries.
    pub fn excerpt(&self, span: Range<usize>) -> &str {
        let mut start = span.start.min(self.src.len());
        let mut end = span.end.clamp(start, self.src.len());
        while !self.src.is_char_boundary(start) {
            start -= 1;
        }
        while !self.src.is_char_boundary(end) {
            end += 1;
        }
        &self.src[start..end]
    }
}
