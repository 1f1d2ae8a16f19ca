//! Source positions and byte ranges.

use std::fmt;
use std::sync::Arc;

/// A point in the source: filename, byte offset, 1-based line, 0-based column.
///
/// `offset` indexes the scanner's accumulated buffer. `column` counts bytes
/// since the last newline, so a multi-byte code point advances it by its
/// UTF-8 width.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub filename: Arc<str>,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position of the first byte of `filename`.
    pub fn start(filename: impl Into<Arc<str>>) -> Self {
        Position {
            filename: filename.into(),
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Step over one consumed code point.
    pub fn advance(&mut self, ch: char) {
        let width = ch.len_utf8();
        self.offset += width;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            // A single code point is at most 4 bytes wide.
            self.column += width as u32;
        }
    }

    /// `true` when line and column carry information worth printing.
    pub fn is_known(&self) -> bool {
        self.line != 0 || self.column != 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start("")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filename.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        }
    }
}

/// Half-open byte range `start..end` into the scanner's source buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Loc {
    pub start: usize,
    pub end: usize,
}

impl Loc {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Loc { start, end }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest range covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Loc) -> Loc {
        Loc {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Resolve the range against `source`.
    ///
    /// Returns `None` if the range is out of bounds or splits a code point.
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
