//! Data format identification.
//!
//! [`Format`] names the parser that handles a data source. It is either given
//! explicitly (`-f json`, `-f csv.excel-tab`) or derived from the data file's
//! suffix by [`Format::resolve`].

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Prefix that selects a registered tabular dialect by name: `csv.<dialect>`.
pub const DIALECT_PREFIX: &str = "csv.";

/// Supported data formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Ini,
    Json,
    Xml,
    Yaml,
    /// Tab-separated values using the built-in `tsv` dialect.
    Tsv,
    /// Comma-separated values using the built-in `csv` dialect.
    Csv,
    /// Delimiter-separated values using a named dialect from the registry.
    Dsv(String),
}

impl Format {
    /// Formats recognized by file suffix, in matching order.
    pub fn by_suffix() -> [Format; 6] {
        [
            Format::Ini,
            Format::Json,
            Format::Xml,
            Format::Yaml,
            Format::Tsv,
            Format::Csv,
        ]
    }

    /// The file suffix that selects this format, if any.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Format::Ini => Some(".ini"),
            Format::Json => Some(".json"),
            Format::Xml => Some(".xml"),
            Format::Yaml => Some(".yaml"),
            Format::Tsv => Some(".tsv"),
            Format::Csv => Some(".csv"),
            Format::Dsv(_) => None,
        }
    }

    /// The dialect name for tabular formats.
    pub fn dialect(&self) -> Option<&str> {
        match self {
            Format::Tsv => Some("tsv"),
            Format::Csv => Some("csv"),
            Format::Dsv(name) => Some(name),
            _ => None,
        }
    }

    /// Determines the format of a data source.
    ///
    /// An explicit format name always wins and is validated on its own, so an
    /// unknown name fails even if the file suffix would have matched. Without
    /// one, the file name's suffix is matched exactly (case-sensitive) against
    /// [`Format::by_suffix`].
    ///
    /// ```
    /// use jinja_data::Format;
    ///
    /// assert_eq!(Format::resolve(None, Some("people.csv")).unwrap(), Format::Csv);
    /// assert_eq!(
    ///     Format::resolve(Some("csv.excel"), Some("people.txt")).unwrap(),
    ///     Format::Dsv("excel".into())
    /// );
    /// assert!(Format::resolve(None, Some("people.txt")).is_err());
    /// ```
    pub fn resolve(explicit: Option<&str>, file_name: Option<&str>) -> Result<Format, ConfigError> {
        if let Some(name) = explicit {
            return name.parse();
        }

        file_name
            .and_then(|name| {
                Format::by_suffix()
                    .into_iter()
                    .find(|format| format.suffix().is_some_and(|s| name.ends_with(s)))
            })
            .ok_or(ConfigError::NoFormat)
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ini" => Ok(Format::Ini),
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            "yaml" => Ok(Format::Yaml),
            "tsv" => Ok(Format::Tsv),
            "csv" => Ok(Format::Csv),
            other => match other.strip_prefix(DIALECT_PREFIX) {
                Some(dialect) if !dialect.is_empty() => Ok(Format::Dsv(dialect.to_string())),
                _ => Err(ConfigError::InvalidFormat(other.to_string())),
            },
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ini => f.write_str("ini"),
            Format::Json => f.write_str("json"),
            Format::Xml => f.write_str("xml"),
            Format::Yaml => f.write_str("yaml"),
            Format::Tsv => f.write_str("tsv"),
            Format::Csv => f.write_str("csv"),
            Format::Dsv(dialect) => write!(f, "{}{}", DIALECT_PREFIX, dialect),
        }
    }
}
