//! Loaded source files and offset-to-line resolution.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use litehdl_common::ContentHash;

use crate::span::{FileId, Span};

/// One source file and its line table.
pub struct SourceFile {
    /// Handle of this file.
    pub id: FileId,
    /// Path shown in diagnostics. In-memory sources use a synthetic name.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    /// Hash of `content`.
    pub content_hash: ContentHash,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a file and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i as u32 + 1),
            )
            .collect();
        let content_hash = ContentHash::of_str(&content);
        Self {
            id,
            path,
            content,
            content_hash,
            line_starts,
        }
    }

    /// 1-based `(line, column)` of a byte offset. Columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Number of lines. A trailing newline opens one more (empty) line.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Text of the 1-based `line` without its line terminator.
    ///
    /// Returns an empty string for lines past the end of the file.
    pub fn line_text(&self, line: u32) -> &str {
        let Some(idx) = (line as usize).checked_sub(1) else {
            return "";
        };
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start as usize..end].trim_end_matches('\r')
    }

    /// Text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }
}

/// A span converted to 1-based line and column numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Path of the file.
    pub file_path: PathBuf,
    /// First line.
    pub start_line: u32,
    /// First column.
    pub start_col: u32,
    /// Last line.
    pub end_line: u32,
    /// Last column (inclusive).
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}

/// Owner of all source text in a compilation.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` from disk.
    pub fn load_file(&mut self, path: &Path) -> io::Result<FileId> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// The file behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Iterates over all files in load order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Converts `span` into line/column form.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let last = span.end.saturating_sub(1).max(span.start);
        let (end_line, end_col) = file.line_col(last);
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER: &str = "module counter(W=8):\n    in:\n        clk: bit\n";

    #[test]
    fn line_col_lookup() {
        let mut db = SourceDb::new();
        let id = db.add_source("counter.lhdl", COUNTER.to_string());
        let file = db.get_file(id);
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(21), (2, 1));
        assert_eq!(file.line_col(25), (2, 5));
    }

    #[test]
    fn line_text_strips_terminator() {
        let mut db = SourceDb::new();
        let id = db.add_source("counter.lhdl", COUNTER.to_string());
        let file = db.get_file(id);
        assert_eq!(file.line_text(1), "module counter(W=8):");
        assert_eq!(file.line_text(3), "        clk: bit");
        assert_eq!(file.line_text(4), "");
        assert_eq!(file.line_text(0), "");
        assert_eq!(file.line_text(99), "");
    }

    #[test]
    fn line_text_handles_crlf() {
        let mut db = SourceDb::new();
        let id = db.add_source("crlf.lhdl", "a\r\nb".to_string());
        assert_eq!(db.get_file(id).line_text(1), "a");
        assert_eq!(db.get_file(id).line_text(2), "b");
    }

    #[test]
    fn resolve_span_display() {
        let mut db = SourceDb::new();
        let id = db.add_source("counter.lhdl", COUNTER.to_string());
        let resolved = db.resolve_span(Span::new(id, 25, 27));
        assert_eq!(resolved.to_string(), "counter.lhdl:2:5");
        assert_eq!((resolved.end_line, resolved.end_col), (2, 6));
        assert_eq!(db.snippet(Span::new(id, 25, 27)), "in");
    }

    #[test]
    fn line_count_includes_trailing_line() {
        let mut db = SourceDb::new();
        let id = db.add_source("x.lhdl", "a\nb\n".to_string());
        assert_eq!(db.get_file(id).line_count(), 3);
    }

    #[test]
    fn load_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.lhdl");
        std::fs::write(&path, "module top():\n    pass\n").unwrap();
        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).path, path);
        assert_eq!(db.files().count(), 1);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let mut db = SourceDb::new();
        let err = db.load_file(Path::new("/nonexistent/none.lhdl")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
