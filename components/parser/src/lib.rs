//! ECMAScript Parser Component
//!
//! Provides the tokenizer, grammar engine, AST and ESTree serializer for
//! ECMAScript 2015 through 2021 source text.
//!
//! # Overview
//!
//! - [`Lexer`] - Pull-based tokenizer with two-token lookahead
//! - [`Token`] - Token kinds, positions and ASI flags
//! - [`Parser`] - Recursive descent parser producing a [`Program`]
//! - [`ast`] - Closed, ESTree-shaped node types
//! - [`estree`] - Deterministic ESTree JSON serializer
//! - [`ParseOptions`] - Edition, source type and permissive switches
//!
//! # Example
//!
//! ```
//! use parser::{parse_program, estree, ParseOptions};
//!
//! let source = "let x = 42;";
//! let program = parse_program(source, &ParseOptions::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//!
//! let json = estree::serialize(&program);
//! assert!(json.contains("\"kind\":\"let\""));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod estree;
pub mod lexer;
pub mod options;
pub mod parser;

pub use ast::{Expression, Pattern, Program, Statement};
pub use core_types::{ErrorKind, ParseError, SourcePosition, Span};
pub use error::ParseResult;
pub use estree::SerializeOptions;
pub use lexer::{Keyword, Lexer, Punctuator, Token, TokenKind};
pub use options::{EcmaVersion, ParseOptions, SourceType};
pub use parser::{parse_program, Parser, MAX_NESTING_DEPTH};

/// Parse `source` and serialize the resulting program as ESTree JSON
///
/// # Examples
///
/// ```
/// use parser::{parse_to_json, ParseOptions, SerializeOptions};
///
/// let json = parse_to_json("a\nb", &ParseOptions::default(), &SerializeOptions::default()).unwrap();
/// assert_eq!(json.matches("ExpressionStatement").count(), 2);
/// ```
pub fn parse_to_json(
    source: &str,
    options: &ParseOptions,
    serialize_options: &SerializeOptions,
) -> ParseResult<String> {
    let program = parse_program(source, options)?;
    Ok(estree::serialize_with(&program, serialize_options))
}
