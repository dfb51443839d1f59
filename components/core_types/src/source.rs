//! Source position and span types for ECMAScript source tracking.
//!
//! Offsets and columns are measured in UTF-16 code units so that positions
//! line up with the string indices ESTree consumers use.

use serde::Serialize;

/// Represents a position in source code.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 1,
///     column: 4,
///     offset: 4,
/// };
///
/// assert_eq!(pos.line, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (0-indexed, UTF-16 code units from the line start)
    pub column: u32,
    /// Offset from the start of the source, in UTF-16 code units
    pub offset: usize,
}

impl SourcePosition {
    /// Position of the first character of a source text
    pub const START: SourcePosition = SourcePosition {
        line: 1,
        column: 0,
        offset: 0,
    };
}

/// A half-open `[start, end)` range of source text.
///
/// # Examples
///
/// ```
/// use core_types::{SourcePosition, Span};
///
/// let start = SourcePosition::START;
/// let end = SourcePosition { line: 1, column: 3, offset: 3 };
/// let span = Span::new(start, end);
///
/// assert_eq!(span.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Inclusive start
    pub start: SourcePosition,
    /// Exclusive end
    pub end: SourcePosition,
}

impl Span {
    /// Create a span between two positions
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Span running from the start of `self` to the end of `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// True for zero-width spans
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies entirely within `self`
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize) -> SourcePosition {
        SourcePosition {
            line: 1,
            column: offset as u32,
            offset,
        }
    }

    #[test]
    fn test_source_position_start() {
        assert_eq!(SourcePosition::START.line, 1);
        assert_eq!(SourcePosition::START.column, 0);
        assert_eq!(SourcePosition::START.offset, 0);
    }

    #[test]
    fn test_span_join_and_contains() {
        let a = Span::new(pos(0), pos(3));
        let b = Span::new(pos(5), pos(9));
        let joined = a.to(b);
        assert_eq!(joined.len(), 9);
        assert!(joined.contains(&a));
        assert!(joined.contains(&b));
        assert!(!a.contains(&b));
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(pos(4), pos(4));
        assert!(span.is_empty());
    }
}
