//! Where a template comes from.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name given to a template that was supplied as text rather than a file.
pub const INLINE_NAME: &str = "<stdin>";

/// A template to render.
///
/// Inline templates are rendered on their own; a file template may include,
/// import or extend other templates that live next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template text already in memory, typically read from stdin.
    Inline(String),
    /// A template file on disk.
    File(PathBuf),
}

impl TemplateSource {
    pub fn inline(source: impl Into<String>) -> Self {
        TemplateSource::Inline(source.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        TemplateSource::File(path.into())
    }

    /// Directory searched for the template and anything it references.
    ///
    /// A bare file name searches the current directory.
    pub fn search_dir(&self) -> Option<&Path> {
        match self {
            TemplateSource::Inline(_) => None,
            TemplateSource::File(path) => Some(match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            }),
        }
    }

    /// Name the engine knows the template by: the file name without its
    /// directory.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            TemplateSource::Inline(_) => Cow::Borrowed(INLINE_NAME),
            TemplateSource::File(path) => match path.file_name() {
                Some(name) => name.to_string_lossy(),
                None => path.to_string_lossy(),
            },
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Inline(_) => f.write_str(INLINE_NAME),
            TemplateSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
