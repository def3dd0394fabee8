//! Tabular dialects.
//!
//! A [`Dialect`] describes how delimiter-separated text is split into rows and
//! fields. Dialects live in a [`DialectRegistry`] and are looked up by name when
//! a tabular [`Format`](crate::Format) is parsed.
//!
//! # Built-in dialects
//!
//! | Name        | Delimiter | Quoting | Escape | Strict |
//! |-------------|-----------|---------|--------|--------|
//! | `csv`       | `,`       | none    | `\`    | yes    |
//! | `tsv`       | tab       | none    | `\`    | yes    |
//! | `excel`     | `,`       | minimal | -      | no     |
//! | `excel-tab` | tab       | minimal | -      | no     |
//! | `unix`      | `,`       | minimal | -      | no     |

use std::collections::HashMap;

/// How fields may be quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Fields may be wrapped in the quote character.
    Minimal,
    /// Quote characters are ordinary data.
    None,
}

/// Settings for reading one flavor of delimiter-separated values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quoting: Quoting,
    pub quote: u8,
    /// A doubled quote inside a quoted field stands for one quote.
    pub double_quote: bool,
    /// Makes the following character literal.
    pub escape: Option<u8>,
    /// A lone escape character at the end of the input is an error.
    pub strict: bool,
}

impl Dialect {
    /// A dialect with the given delimiter and conventional quoting.
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            quoting: Quoting::Minimal,
            quote: b'"',
            double_quote: true,
            escape: None,
            strict: false,
        }
    }

    /// A strict dialect with quoting disabled and `\` as escape character.
    pub fn escaped(delimiter: u8) -> Self {
        Self {
            delimiter,
            quoting: Quoting::None,
            quote: b'"',
            double_quote: false,
            escape: Some(b'\\'),
            strict: true,
        }
    }

    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Named dialects available to the tabular parser.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: HashMap<String, Dialect>,
}

impl DialectRegistry {
    /// An empty registry, without the built-in dialects.
    pub fn empty() -> Self {
        Self {
            dialects: HashMap::new(),
        }
    }

    /// Registers a dialect, replacing any existing one with the same name.
    pub fn register(&mut self, name: impl Into<String>, dialect: Dialect) -> &mut Self {
        self.dialects.insert(name.into(), dialect);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Dialect> {
        self.dialects.get(name)
    }

    /// Registered dialect names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("csv", Dialect::escaped(b','))
            .register("tsv", Dialect::escaped(b'\t'))
            .register("excel", Dialect::new(b','))
            .register("excel-tab", Dialect::new(b'\t'))
            .register("unix", Dialect::new(b','));
        registry
    }
}
