//! Parse error types.
//!
//! A parse fails with exactly one [`ParseError`] describing the first point
//! of failure. There is no error recovery and no list of accumulated errors.

use crate::SourcePosition;
use serde::Serialize;
use std::fmt;

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Malformed token: unterminated literal, invalid escape, bad number
    LexicalError,
    /// Token stream does not match the grammar
    SyntaxError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::LexicalError => write!(f, "LexicalError"),
            ErrorKind::SyntaxError => write!(f, "SyntaxError"),
        }
    }
}

/// An error produced while tokenizing or parsing source text.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, ParseError, SourcePosition};
///
/// let error = ParseError::new(
///     ErrorKind::SyntaxError,
///     "Unexpected token",
///     SourcePosition { line: 1, column: 9, offset: 9 },
/// );
///
/// assert_eq!(error.to_string(), "SyntaxError: Unexpected token (1:9)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {message} ({}:{})", position.line, position.column)]
pub struct ParseError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Where the error occurred
    #[serde(flatten)]
    pub position: SourcePosition,
}

impl ParseError {
    /// Create a new error
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    /// Offset of the failure in UTF-16 code units
    pub fn offset(&self) -> usize {
        self.position.offset
    }
}
