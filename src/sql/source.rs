//! Source buffers and diagnostic positions
//!
//! The filename never influences behavior; it only shows up in rendered positions.

use serde::Serialize;
use std::fmt;

/// A named, fully in-memory source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile<'src> {
    name: String,
    buffer: &'src str,
}

impl<'src> SourceFile<'src> {
    pub fn new(name: impl Into<String>, buffer: &'src str) -> Self {
        SourceFile {
            name: name.into(),
            buffer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buffer(&self) -> &'src str {
        self.buffer
    }

    /// Resolve a byte offset into a 1-based line/column position.
    ///
    /// Offsets past the end clamp to the end of the buffer; offsets inside a multi-byte
    /// character resolve to that character. Columns count characters, not bytes.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.buffer.len());
        while !self.buffer.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &self.buffer[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;

        Position {
            file: self.name.clone(),
            offset,
            line,
            column,
        }
    }
}

/// A human-readable location, `file:line:column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub file: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_line() {
        let file = SourceFile::new("query.sql", "SELECT 1");
        let pos = file.position(7);
        assert_eq!((pos.line, pos.column), (1, 8));
        assert_eq!(pos.to_string(), "query.sql:1:8");
    }

    #[test]
    fn test_position_after_newlines() {
        let file = SourceFile::new("", "SELECT 1;\n\nSELECT 2");
        let pos = file.position(11);
        assert_eq!((pos.line, pos.column), (3, 1));
        assert_eq!(pos.to_string(), "3:1");
    }

    #[test]
    fn test_position_clamps_and_counts_chars() {
        let file = SourceFile::new("", "SELECT 'é'");
        // inside the two-byte character
        let inside = file.position(9);
        assert_eq!(inside.offset, 8);
        assert_eq!(inside.column, 9);

        let past_end = file.position(100);
        assert_eq!(past_end.offset, file.buffer().len());
        assert_eq!(past_end.column, 11);
    }
}
