//! Parser error types and helpers

use core_types::{ErrorKind, ParseError, SourcePosition};

/// Result type used throughout the tokenizer and grammar engine
pub type ParseResult<T> = Result<T, ParseError>;

/// Create a syntax error at a given position
pub fn syntax_error(message: impl Into<String>, position: SourcePosition) -> ParseError {
    ParseError::new(ErrorKind::SyntaxError, message, position)
}

/// Create a lexical error at a given position
pub fn lexical_error(message: impl Into<String>, position: SourcePosition) -> ParseError {
    ParseError::new(ErrorKind::LexicalError, message, position)
}

/// Create an unexpected token error
pub fn unexpected_token(expected: &str, got: &str, position: SourcePosition) -> ParseError {
    syntax_error(format!("Expected {}, got {}", expected, got), position)
}

/// Create an unexpected end of input error
pub fn unexpected_eof(position: SourcePosition) -> ParseError {
    syntax_error("Unexpected end of input", position)
}
