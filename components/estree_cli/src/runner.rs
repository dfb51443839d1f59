//! Source-to-JSON driver
//!
//! The Runner owns the parse and output options and turns a file, a reader
//! or stdin into an ESTree JSON document.

use crate::error::{CliError, CliResult};
use parser::{ParseOptions, SerializeOptions};
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Parses sources with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Runner {
    /// Grammar options
    parse_options: ParseOptions,
    /// Output options
    serialize_options: SerializeOptions,
}

impl Runner {
    /// Create a runner for the given grammar options
    ///
    /// # Example
    /// ```
    /// use estree_cli::Runner;
    /// use parser::ParseOptions;
    ///
    /// let runner = Runner::new(ParseOptions::default());
    /// let json = runner.run_source("42").unwrap();
    /// assert!(json.contains("\"value\":42"));
    /// ```
    pub fn new(parse_options: ParseOptions) -> Self {
        Self {
            parse_options,
            serialize_options: SerializeOptions::default(),
        }
    }

    /// Set output options
    pub fn with_serialize_options(mut self, serialize_options: SerializeOptions) -> Self {
        self.serialize_options = serialize_options;
        self
    }

    /// Parse a source string
    ///
    /// # Errors
    /// Returns `CliError::Parse` when the source is not valid ECMAScript
    pub fn run_source(&self, source: &str) -> CliResult<String> {
        let json = parser::parse_to_json(source, &self.parse_options, &self.serialize_options)?;
        Ok(json)
    }

    /// Read a file to completion and parse it
    ///
    /// # Example
    /// ```no_run
    /// use estree_cli::Runner;
    /// use parser::ParseOptions;
    ///
    /// let runner = Runner::new(ParseOptions::module());
    /// let json = runner.run_file("example.mjs").unwrap();
    /// ```
    pub fn run_file(&self, path: impl AsRef<Path>) -> CliResult<String> {
        let source = std::fs::read_to_string(path)?;
        self.run_source(&source)
    }

    /// Read any input to completion and parse it
    pub fn run_reader(&self, mut reader: impl Read) -> CliResult<String> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.run_source(&source)
    }

    /// Parse piped stdin; an interactive terminal is rejected
    pub fn run_stdin(&self) -> CliResult<String> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(CliError::NoInput);
        }
        self.run_reader(stdin.lock())
    }
}
