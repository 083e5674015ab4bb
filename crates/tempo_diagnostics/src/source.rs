//! Input files and byte spans used to locate diagnostics.
//!
//! Every file handed to a reader (clock constraints, cell library, netlist)
//! is registered in a [`SourceMap`] first. Readers attach [`Span`]s to the
//! diagnostics they emit, and the renderer resolves them back to
//! `path:line:col` through the same map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Opaque identifier of a file registered in a [`SourceMap`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Identifier used by spans that do not point into any file.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// A half-open byte range `[start, end)` within one file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file this span points into.
    pub file: FileId,
    /// Inclusive start offset.
    pub start: u32,
    /// Exclusive end offset.
    pub end: u32,
}

impl Span {
    /// Span with no location, for diagnostics raised outside any input file.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span covering `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns `true` if this span has no location.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-length spans.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded input file with a line index for offset resolution.
pub struct SourceFile {
    /// Path shown in rendered diagnostics.
    pub path: PathBuf,
    /// Full file text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self {
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset to 1-indexed `(line, column)`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Returns the full text of the line containing `offset`, without the newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let (line, _) = self.line_col(offset);
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize);
        self.content[start..end].trim_end_matches(|c: char| c == '\n' || c == '\r')
    }
}

/// A resolved, human-readable position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path.
    pub path: PathBuf,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.col)
    }
}

/// Owns every input file of one analysis run.
#[derive(Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` from disk and registers it.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers in-memory text under the display name `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(name.into(), content));
        id
    }

    /// Returns the file for `id`, or `None` for [`FileId::DUMMY`] or foreign ids.
    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves the start of `span` to a [`Location`].
    pub fn locate(&self, span: Span) -> Option<Location> {
        let file = self.get(span.file)?;
        let (line, col) = file.line_col(span.start);
        Some(Location {
            path: file.path.clone(),
            line,
            col,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_across_lines() {
        let mut map = SourceMap::new();
        let id = map.add_source("adder.fakev", "3\nIN PORT\nG1 INV\n".to_string());
        let file = map.get(id).unwrap();
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(2), (2, 1));
        assert_eq!(file.line_col(5), (2, 4));
        assert_eq!(file.line_col(10), (3, 1));
    }

    #[test]
    fn locate_span() {
        let mut map = SourceMap::new();
        let id = map.add_source("lib.fakelib", "1\nINV 1\nA Y 2.0\n".to_string());
        let span = Span::new(id, 6, 9);
        let loc = map.locate(span).unwrap();
        assert_eq!(loc.line, 2);
        assert_eq!(loc.col, 5);
        assert_eq!(format!("{loc}"), "lib.fakelib:2:5");
    }

    #[test]
    fn line_text_strips_newline() {
        let mut map = SourceMap::new();
        let id = map.add_source("clk.fakesdc", "# period\nclock 10\r\n".to_string());
        let file = map.get(id).unwrap();
        assert_eq!(file.line_text(12), "clock 10");
        assert_eq!(file.line_text(0), "# period");
    }

    #[test]
    fn dummy_span_does_not_resolve() {
        let map = SourceMap::new();
        assert!(Span::DUMMY.is_dummy());
        assert!(map.locate(Span::DUMMY).is_none());
    }

    #[test]
    fn load_missing_file_errors() {
        let mut map = SourceMap::new();
        assert!(map.load_file(Path::new("/nonexistent/adder.fakev")).is_err());
    }
}
