//! ESTree CLI Library
//!
//! Provides the argument parser, the Runner and the error type behind the
//! `estree` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runner;

pub use cli::{Cli, ErrorFormat};
pub use error::{CliError, CliResult};
pub use runner::Runner;
