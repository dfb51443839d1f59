//! Parser configuration
//!
//! [`ParseOptions`] selects the grammar edition and source type, mirroring
//! the option names ESTree tooling uses (`ecmaVersion`, `sourceType`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an option value cannot be understood
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// ecmaVersion outside the supported editions
    #[error("unsupported ecmaVersion {0} (expected 2015-2021, 6-12 or \"latest\")")]
    UnsupportedEcmaVersion(String),
    /// sourceType other than script/module
    #[error("unknown sourceType {0:?} (expected \"script\" or \"module\")")]
    UnknownSourceType(String),
}

/// ECMAScript edition, stored as its year.
///
/// # Examples
///
/// ```
/// use parser::options::EcmaVersion;
///
/// let v: EcmaVersion = "11".parse().unwrap();
/// assert_eq!(v, EcmaVersion::ES2020);
/// assert!(v >= EcmaVersion::ES2017);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EcmaVersion(u32);

impl EcmaVersion {
    /// ES6
    pub const ES2015: EcmaVersion = EcmaVersion(2015);
    /// Exponentiation operator
    pub const ES2016: EcmaVersion = EcmaVersion(2016);
    /// Async functions
    pub const ES2017: EcmaVersion = EcmaVersion(2017);
    /// Object rest/spread, async iteration
    pub const ES2018: EcmaVersion = EcmaVersion(2018);
    /// Optional catch binding
    pub const ES2019: EcmaVersion = EcmaVersion(2019);
    /// Optional chaining, nullish coalescing, BigInt, dynamic import
    pub const ES2020: EcmaVersion = EcmaVersion(2020);
    /// Numeric separators, logical assignment
    pub const ES2021: EcmaVersion = EcmaVersion(2021);
    /// Newest supported edition
    pub const LATEST: EcmaVersion = EcmaVersion::ES2021;

    /// Build from a year (2015-2021) or an edition number (6-12)
    pub fn new(version: u32) -> Result<Self, OptionsError> {
        let year = match version {
            6..=12 => version + 2009,
            other => other,
        };
        if (2015..=2021).contains(&year) {
            Ok(EcmaVersion(year))
        } else {
            Err(OptionsError::UnsupportedEcmaVersion(version.to_string()))
        }
    }

    /// The edition year
    pub fn year(self) -> u32 {
        self.0
    }
}

impl Default for EcmaVersion {
    fn default() -> Self {
        EcmaVersion::ES2020
    }
}

impl TryFrom<u32> for EcmaVersion {
    type Error = OptionsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        EcmaVersion::new(value)
    }
}

impl From<EcmaVersion> for u32 {
    fn from(version: EcmaVersion) -> Self {
        version.0
    }
}

impl FromStr for EcmaVersion {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(EcmaVersion::LATEST);
        }
        let number = trimmed
            .trim_start_matches("es")
            .trim_start_matches("ES")
            .parse::<u32>()
            .map_err(|_| OptionsError::UnsupportedEcmaVersion(s.to_string()))?;
        EcmaVersion::new(number)
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the source is a classic script or an ES module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Classic script: sloppy by default, no import/export
    #[default]
    Script,
    /// Module: implicitly strict, import/export allowed, `await` reserved
    Module,
}

impl SourceType {
    /// The ESTree spelling
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Script => "script",
            SourceType::Module => "module",
        }
    }
}

impl FromStr for SourceType {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "script" => Ok(SourceType::Script),
            "module" => Ok(SourceType::Module),
            other => Err(OptionsError::UnknownSourceType(other.to_string())),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options recognized by the grammar engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Grammar edition
    pub ecma_version: EcmaVersion,
    /// Script or module goal
    pub source_type: SourceType,
    /// Accept `return` at the top level
    pub allow_return_outside_function: bool,
    /// Treat a leading `#!` line as a comment
    pub allow_hash_bang: bool,
    /// Accept `await` expressions at the top level
    pub allow_await_outside_function: bool,
}

impl ParseOptions {
    /// Options for module code at the default edition
    pub fn module() -> Self {
        Self {
            source_type: SourceType::Module,
            ..Self::default()
        }
    }

    /// Builder-style edition override
    pub fn with_ecma_version(mut self, ecma_version: EcmaVersion) -> Self {
        self.ecma_version = ecma_version;
        self
    }

    /// Builder-style source type override
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// True when parsing module code
    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }
}
