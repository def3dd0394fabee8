//! Standard input abstraction.
//!
//! Data files named `-` are read from stdin. Going through [`StdinReader`]
//! lets tests feed data without touching the process's real stdin.

use std::io::{self, Read};

/// Source of standard input.
pub trait StdinReader {
    /// Reads everything available on stdin.
    fn read_to_string(&self) -> io::Result<String>;
}

/// The process's real stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn read_to_string(&self) -> io::Result<String> {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

/// Canned stdin for tests.
#[derive(Debug, Clone, Default)]
pub struct MockStdin {
    content: String,
}

impl MockStdin {
    /// Stdin that yields `content`.
    pub fn piped(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Stdin that is already at end of input.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl StdinReader for MockStdin {
    fn read_to_string(&self) -> io::Result<String> {
        Ok(self.content.clone())
    }
}

impl<R: StdinReader + ?Sized> StdinReader for &R {
    fn read_to_string(&self) -> io::Result<String> {
        (**self).read_to_string()
    }
}
