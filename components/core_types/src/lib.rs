//! Shared source-location and error types.
//!
//! This crate provides the foundational types used by the tokenizer, the
//! grammar engine and the CLI.
//!
//! # Overview
//!
//! - [`SourcePosition`] - Line/column/offset location in source
//! - [`Span`] - Half-open range between two positions
//! - [`ParseError`] - The single error a failed parse produces
//! - [`ErrorKind`] - Lexical vs. syntactic failure
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, ParseError, SourcePosition};
//!
//! let error = ParseError::new(ErrorKind::SyntaxError, "Unexpected token", SourcePosition::START);
//! assert_eq!(error.offset(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, ParseError};
pub use source::{SourcePosition, Span};
