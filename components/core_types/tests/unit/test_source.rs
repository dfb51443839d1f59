//! Unit tests for SourcePosition and Span

use core_types::{SourcePosition, Span};

fn at(line: u32, column: u32, offset: usize) -> SourcePosition {
    SourcePosition {
        line,
        column,
        offset,
    }
}

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = at(10, 5, 150);

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_source_position_default_is_zeroed() {
        let pos = SourcePosition::default();
        assert_eq!(pos, at(0, 0, 0));
    }

    #[test]
    fn test_source_position_is_copy() {
        let pos = at(3, 1, 20);
        let copied = pos;
        assert_eq!(pos, copied);
    }

    #[test]
    fn test_source_position_serializes_fields() {
        let json = serde_json::to_string(&at(2, 4, 9)).unwrap();
        assert_eq!(json, r#"{"line":2,"column":4,"offset":9}"#);
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn test_span_across_lines() {
        let span = Span::new(at(1, 0, 0), at(3, 2, 14));
        assert_eq!(span.len(), 14);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_contains_nested_span() {
        let outer = Span::new(at(1, 0, 0), at(1, 10, 10));
        let inner = Span::new(at(1, 2, 2), at(1, 5, 5));
        let overlapping = Span::new(at(1, 8, 8), at(1, 12, 12));

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&overlapping));
    }

    #[test]
    fn test_span_to_keeps_outer_bounds() {
        let first = Span::new(at(1, 0, 0), at(1, 1, 1));
        let last = Span::new(at(2, 0, 5), at(2, 3, 8));
        let joined = first.to(last);

        assert_eq!(joined.start, first.start);
        assert_eq!(joined.end, last.end);
    }
}
