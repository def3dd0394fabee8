//! Error types for data loading.
//!
//! Failures fall into two groups: [`ConfigError`] when the invocation itself is
//! wrong (no format, unknown format, unknown dialect) and [`DataError`] when the
//! data stream cannot be parsed under the resolved [`Format`]. [`LoadError`]
//! wraps both, plus failure to open the data file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Format;

/// The requested data format cannot be determined or is not supported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither an explicit format nor a recognized file suffix was given.
    #[error("no data format determined")]
    NoFormat,

    /// The explicit format name is not one we know.
    #[error("invalid data format: {0}")]
    InvalidFormat(String),

    /// `csv.<name>` named a dialect missing from the registry.
    #[error("unknown tabular dialect: {0}")]
    UnknownDialect(String),
}

/// Why a parser rejected its input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the stream failed (including invalid UTF-8).
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Xml(String),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// Malformed ini input, with the 1-based line where it was detected.
    #[error("line {line}: {message}")]
    Ini { line: usize, message: String },

    /// Malformed delimiter-separated input outside of what the csv reader checks.
    #[error("line {line}: {message}")]
    Dsv { line: usize, message: String },

    /// Well-formed input using a construct we refuse to convert.
    #[error("{0}")]
    Unsupported(String),
}

impl ParseError {
    pub(crate) fn ini(line: usize, message: impl Into<String>) -> Self {
        Self::Ini {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn dsv(line: usize, message: impl Into<String>) -> Self {
        Self::Dsv {
            line,
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml(err.to_string())
    }
}

/// The data stream could not be parsed under the resolved format.
#[derive(Debug, Error)]
#[error("failed to parse {format} data: {source}")]
pub struct DataError {
    pub format: Format,
    #[source]
    pub source: ParseError,
}

impl DataError {
    pub fn new(format: Format, source: ParseError) -> Self {
        Self { format, source }
    }
}

/// Any failure while turning a data source into a context.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("cannot open data file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
