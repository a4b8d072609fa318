//! Text span and range types for source location tracking.
//!
//! Tokens carry char-offset ranges; AST nodes carry line/column spans derived
//! from the first and last token of the construct they were built from.

use std::fmt;

/// A position in source text, measured in chars from the start.
pub type TextPos = u32;

/// A line/column span attached to AST nodes.
///
/// Lines are 1-based, columns are 0-based and counted in chars. The end
/// position is exclusive: it points just past the last char of the construct.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    #[inline]
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// The start position as a `(line, column)` pair.
    #[inline]
    pub fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_col)
    }

    /// The end position as a `(line, column)` pair.
    #[inline]
    pub fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_col)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A char-offset range with start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// The char offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The char offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column in chars.
    pub column: u32,
}

/// A map from char offsets to line numbers, built from source text.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Char offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut chars = text.chars().enumerate().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\n' => line_starts.push((i + 1) as u32),
                '\r' => {
                    if matches!(chars.peek(), Some((_, '\n'))) {
                        chars.next();
                        line_starts.push((i + 2) as u32);
                    } else {
                        line_starts.push((i + 1) as u32);
                    }
                }
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Get the line index (0-based) for a char offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the 1-based line and 0-based column for a char offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line: line + 1,
            column: pos - line_start,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_positions() {
        let span = Span::new(1, 4, 3, 1);
        assert_eq!(span.start(), (1, 4));
        assert_eq!(span.end(), (3, 1));
        assert_eq!(format!("{:?}", span), "1:4..3:1");
        assert_eq!(span.to_string(), "1:4");
    }

    #[test]
    fn test_text_range() {
        let range = TextRange::new(5, 15);
        assert_eq!(range.len(), 10);
        assert!(!range.is_empty());
        assert!(TextRange::new(3, 3).is_empty());
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\r\nline3\rx";
        let map = LineMap::new(text);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(13), 2);
        assert_eq!(map.line_of(19), 3);
        assert_eq!(map.line_and_column_of(8), LineAndColumn { line: 2, column: 2 });
    }

    #[test]
    fn test_line_map_counts_chars() {
        let map = LineMap::new("é\nü");
        assert_eq!(map.line_and_column_of(2), LineAndColumn { line: 2, column: 0 });
    }
}
