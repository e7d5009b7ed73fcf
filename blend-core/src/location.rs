use std::ops::{Range, RangeBounds};

use serde::Serialize;

/// A position in a source file, as reported by the parser on every node.
///
/// `line` and `column` are 1-based; a zero means the position is unknown (nodes synthesized by
/// the driver rather than read from source).
#[derive(Debug, Default, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Location {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            line: 0,
            column: 0,
            start_byte: start,
            end_byte: end,
        }
    }

    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            start_byte: offset,
            end_byte: offset,
        }
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    pub fn merge(&self, other: Location) -> Location {
        Location {
            line: self.line,
            column: self.column,
            start_byte: self.start_byte,
            end_byte: other.end_byte,
        }
    }

    pub fn contains(&self, byte_offset: usize) -> bool {
        byte_offset >= self.start_byte && byte_offset <= self.end_byte
    }

    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "@{}", self.start_byte)
        }
    }
}

impl From<(usize, usize)> for Location {
    fn from((start_byte, end_byte): (usize, usize)) -> Self {
        Self::new(start_byte, end_byte)
    }
}

impl From<Range<usize>> for Location {
    fn from(range: Range<usize>) -> Self {
        let start = match range.start_bound() {
            std::ops::Bound::Included(start) => *start,
            std::ops::Bound::Excluded(start) => *start,
            std::ops::Bound::Unbounded => {
                panic!("can only construct a location from bounded ranges")
            }
        };

        let end = match range.end_bound() {
            std::ops::Bound::Included(end) => *end,
            std::ops::Bound::Excluded(end) => *end,
            std::ops::Bound::Unbounded => {
                panic!("can only construct a location from bounded ranges")
            }
        };

        Self::new(start, end)
    }
}
