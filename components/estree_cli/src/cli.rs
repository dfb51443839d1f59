//! Command line arguments

use crate::error::CliResult;
use clap::{Parser, ValueEnum};
use parser::{EcmaVersion, ParseOptions, SerializeOptions, SourceType};
use std::path::PathBuf;

/// How failures are reported on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorFormat {
    /// `SyntaxError: Unexpected token (1:9)`
    #[default]
    Text,
    /// `{"kind":...,"message":...,"line":...,"column":...,"offset":...}`
    Json,
}

/// Parse ECMAScript source and print its ESTree AST as JSON
#[derive(Debug, Parser)]
#[command(name = "estree", version, about)]
pub struct Cli {
    /// Source file to parse (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// ECMAScript edition: 2015-2021, 6-12 or "latest"
    #[arg(short = 'e', long, default_value = "2020")]
    pub ecma_version: String,

    /// Goal symbol: "script" or "module"
    #[arg(short = 's', long, default_value = "script")]
    pub source_type: String,

    /// Include line/column `loc` objects
    #[arg(short = 'l', long)]
    pub locations: bool,

    /// Emit ParenthesizedExpression nodes
    #[arg(long)]
    pub preserve_parens: bool,

    /// Accept `return` at the top level
    #[arg(long)]
    pub allow_return_outside_function: bool,

    /// Skip a leading `#!` line
    #[arg(long)]
    pub allow_hash_bang: bool,

    /// Accept `await` at the top level
    #[arg(long)]
    pub allow_await_outside_function: bool,

    /// Diagnostic format on failure
    #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
    pub error_format: ErrorFormat,
}

impl Cli {
    /// Grammar options selected by the flags
    ///
    /// # Errors
    /// Returns `CliError::InvalidOption` for an unknown edition or source type
    pub fn parse_options(&self) -> CliResult<ParseOptions> {
        let ecma_version: EcmaVersion = self.ecma_version.parse()?;
        let source_type: SourceType = self.source_type.parse()?;
        Ok(ParseOptions {
            ecma_version,
            source_type,
            allow_return_outside_function: self.allow_return_outside_function,
            allow_hash_bang: self.allow_hash_bang,
            allow_await_outside_function: self.allow_await_outside_function,
        })
    }

    /// Output options selected by the flags
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            locations: self.locations,
            preserve_parens: self.preserve_parens,
        }
    }
}
