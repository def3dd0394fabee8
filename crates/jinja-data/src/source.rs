//! Where data comes from.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// Argument value that stands for standard input (and output).
pub const STDIO_SENTINEL: &str = "-";

/// A data file argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Stdin,
    File(PathBuf),
}

impl DataSource {
    /// `-` means stdin; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            DataSource::Stdin
        } else {
            DataSource::File(PathBuf::from(arg))
        }
    }

    /// The name whose suffix selects a format.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            DataSource::Stdin => Cow::Borrowed(STDIO_SENTINEL),
            DataSource::File(path) => path.to_string_lossy(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Stdin => f.write_str("<stdin>"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
