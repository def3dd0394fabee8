//! Why a template could not be rendered.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A failed render.
///
/// Engine failures keep the engine's message, which names the template and
/// line where it has them.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file, or one it includes, imports or extends, is missing.
    #[error("{0}")]
    NotFound(String),

    /// The template file exists but could not be read as UTF-8 text.
    #[error("cannot read template '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template does not parse.
    #[error("{0}")]
    Syntax(String),

    /// The template uses a variable, filter, test, function or method that
    /// does not exist. Variables only fail with strict undefined handling.
    #[error("{0}")]
    Undefined(String),

    /// Evaluation failed, e.g. a filter applied to the wrong kind of value.
    #[error("{0}")]
    Failed(String),
}

impl RenderError {
    pub(crate) fn read(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            RenderError::NotFound(format!("template not found: {}", path.display()))
        } else {
            RenderError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        let message = err.to_string();
        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::NotFound(message),
            ErrorKind::SyntaxError | ErrorKind::BadEscape => RenderError::Syntax(message),
            ErrorKind::UndefinedError
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownMethod => RenderError::Undefined(message),
            _ => RenderError::Failed(message),
        }
    }
}
