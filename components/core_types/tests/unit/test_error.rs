//! Unit tests for ParseError and ErrorKind

use core_types::{ErrorKind, ParseError, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_lexical_error() {
        let kind = ErrorKind::LexicalError;
        assert!(matches!(kind, ErrorKind::LexicalError));
        assert_eq!(kind.to_string(), "LexicalError");
    }

    #[test]
    fn test_error_kind_syntax_error() {
        let kind = ErrorKind::SyntaxError;
        assert!(matches!(kind, ErrorKind::SyntaxError));
        assert_eq!(kind.to_string(), "SyntaxError");
    }
}

#[cfg(test)]
mod parse_error_tests {
    use super::*;

    fn sample() -> ParseError {
        ParseError::new(
            ErrorKind::SyntaxError,
            "Unexpected token",
            SourcePosition {
                line: 3,
                column: 7,
                offset: 31,
            },
        )
    }

    #[test]
    fn test_parse_error_fields() {
        let error = sample();
        assert_eq!(error.message, "Unexpected token");
        assert_eq!(error.position.line, 3);
        assert_eq!(error.offset(), 31);
    }

    #[test]
    fn test_parse_error_display_includes_location() {
        assert_eq!(sample().to_string(), "SyntaxError: Unexpected token (3:7)");
    }

    #[test]
    fn test_parse_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(sample());
        assert!(error.to_string().starts_with("SyntaxError"));
    }

    #[test]
    fn test_parse_error_json_shape() {
        let value: serde_json::Value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["kind"], "SyntaxError");
        assert_eq!(value["message"], "Unexpected token");
        assert_eq!(value["line"], 3);
        assert_eq!(value["column"], 7);
        assert_eq!(value["offset"], 31);
    }

    #[test]
    fn test_parse_error_clone_eq() {
        let error = sample();
        assert_eq!(error.clone(), error);
    }
}
