//! Error types for the CLI

use crate::cli::ErrorFormat;
use core_types::ParseError;
use parser::options::OptionsError;
use serde_json::json;

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input could not be read
    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),

    /// Source text is not valid ECMAScript
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Stdin is an interactive terminal and no file was given
    #[error("This program requires input to be piped to it.")]
    NoInput,

    /// Unknown edition or source type
    #[error("Invalid option: {0}")]
    InvalidOption(#[from] OptionsError),
}

impl CliError {
    /// Diagnostic text in the requested format
    pub fn render(&self, format: ErrorFormat) -> String {
        match format {
            ErrorFormat::Text => self.to_string(),
            ErrorFormat::Json => self.to_json(),
        }
    }

    fn to_json(&self) -> String {
        let value = match self {
            CliError::Parse(err) => json!({
                "kind": err.kind.to_string(),
                "message": err.message,
                "line": err.position.line,
                "column": err.position.column,
                "offset": err.position.offset,
            }),
            CliError::Io(err) => json!({ "kind": "IoError", "message": err.to_string() }),
            CliError::NoInput => json!({ "kind": "NoInput", "message": self.to_string() }),
            CliError::InvalidOption(err) => {
                json!({ "kind": "InvalidOption", "message": err.to_string() })
            }
        };
        value.to_string()
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ErrorKind, SourcePosition};
    use serde_json::Value;

    fn syntax_error() -> CliError {
        CliError::Parse(ParseError::new(
            ErrorKind::SyntaxError,
            "Unexpected token",
            SourcePosition {
                line: 1,
                column: 9,
                offset: 9,
            },
        ))
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            syntax_error().render(ErrorFormat::Text),
            "SyntaxError: Unexpected token (1:9)"
        );
        assert_eq!(
            CliError::NoInput.render(ErrorFormat::Text),
            "This program requires input to be piped to it."
        );
    }

    #[test]
    fn test_render_json() {
        let value: Value =
            serde_json::from_str(&syntax_error().render(ErrorFormat::Json)).expect("valid JSON");
        assert_eq!(value["kind"], "SyntaxError");
        assert_eq!(value["message"], "Unexpected token");
        assert_eq!(value["line"], 1);
        assert_eq!(value["column"], 9);
        assert_eq!(value["offset"], 9);

        let value: Value =
            serde_json::from_str(&CliError::NoInput.render(ErrorFormat::Json)).expect("valid JSON");
        assert_eq!(value["kind"], "NoInput");
    }

    #[test]
    fn test_from_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(CliError::from(io), CliError::Io(_)));
        let option = OptionsError::UnknownSourceType("jsx".to_string());
        assert!(matches!(CliError::from(option), CliError::InvalidOption(_)));
    }
}
