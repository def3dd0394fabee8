//! Where rendered text goes.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use jinja_data::STDIO_SENTINEL;

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    /// Write to standard output
    Stdout,
    /// Write to a specific file
    File(PathBuf),
}

impl OutputDestination {
    /// `-` means stdout; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            OutputDestination::Stdout
        } else {
            OutputDestination::File(PathBuf::from(arg))
        }
    }

    /// Writes `content` exactly as given, without a trailing newline.
    pub fn write_text(&self, content: &str) -> std::io::Result<()> {
        match self {
            OutputDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(content.as_bytes())?;
                handle.flush()
            }
            OutputDestination::File(path) => {
                validate_path(path)?;
                std::fs::write(path, content)
            }
        }
    }
}

impl fmt::Display for OutputDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputDestination::Stdout => f.write_str("<stdout>"),
            OutputDestination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
