//! Turning a data source into a template context.
//!
//! [`DataLoader`] chains the steps: resolve the format, pick the parser, read
//! the source, normalize the result and, optionally, merge overrides.
//!
//! ```
//! use jinja_data::{DataLoader, DataSource, MockStdin, Override};
//!
//! let loader = DataLoader::new()
//!     .format(Some("json".to_string()))
//!     .with_stdin(MockStdin::piped(r#"{"name": "World"}"#));
//!
//! let context = loader
//!     .load_with_overrides(Some(&DataSource::Stdin), [Override::new("greeting", "Hello")])
//!     .unwrap();
//! assert_eq!(context["name"], "World");
//! assert_eq!(context["greeting"], "Hello");
//! ```

use std::fs::File;
use std::io::BufReader;

use crate::env::{RealStdin, StdinReader};
use crate::parse::Parser;
use crate::{
    merge, normalize, Context, DataError, DataSource, Dialect, DialectRegistry, Format, LoadError,
    Override, ParseError,
};

/// Loads data files into contexts.
#[derive(Debug, Clone)]
pub struct DataLoader<S: StdinReader = RealStdin> {
    format: Option<String>,
    has_headers: bool,
    dialects: DialectRegistry,
    stdin: S,
}

impl DataLoader<RealStdin> {
    /// A loader reading `-` from the real stdin, with the built-in dialects and
    /// header rows enabled.
    pub fn new() -> Self {
        Self {
            format: None,
            has_headers: true,
            dialects: DialectRegistry::default(),
            stdin: RealStdin,
        }
    }
}

impl Default for DataLoader<RealStdin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StdinReader> DataLoader<S> {
    /// Uses `stdin` for sources named `-`.
    pub fn with_stdin<T: StdinReader>(self, stdin: T) -> DataLoader<T> {
        DataLoader {
            format: self.format,
            has_headers: self.has_headers,
            dialects: self.dialects,
            stdin,
        }
    }

    /// Explicit format name; `None` means detect from the file suffix.
    pub fn format(mut self, format: Option<String>) -> Self {
        self.format = format;
        self
    }

    /// Whether the first tabular row names the fields. Default is `true`.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn dialects(mut self, dialects: DialectRegistry) -> Self {
        self.dialects = dialects;
        self
    }

    /// Adds a dialect that `csv.<name>` can select.
    pub fn register_dialect(mut self, name: impl Into<String>, dialect: Dialect) -> Self {
        self.dialects.register(name, dialect);
        self
    }

    /// Loads `source` into a context. No source gives an empty context.
    pub fn load(&self, source: Option<&DataSource>) -> Result<Context, LoadError> {
        let Some(source) = source else {
            if let Some(format) = &self.format {
                tracing::warn!(format = %format, "data format given without a data file; ignored");
            }
            return Ok(Context::new());
        };

        let name = source.name();
        let format = Format::resolve(self.format.as_deref(), Some(name.as_ref()))?;
        let parser = Parser::for_format(&format, &self.dialects, self.has_headers)?;
        tracing::debug!(source = %source, format = %format, "loading data");

        let parsed = match source {
            DataSource::Stdin => self
                .stdin
                .read_to_string()
                .map_err(ParseError::from)
                .and_then(|text| parser.parse(text.as_bytes())),
            DataSource::File(path) => {
                let file = File::open(path).map_err(|source| LoadError::Open {
                    path: path.clone(),
                    source,
                })?;
                parser.parse(BufReader::new(file))
            }
        };
        let value = parsed.map_err(|source| DataError::new(format, source))?;

        Ok(normalize(value))
    }

    /// Loads `source` and applies `overrides` on top, in order.
    pub fn load_with_overrides<I>(
        &self,
        source: Option<&DataSource>,
        overrides: I,
    ) -> Result<Context, LoadError>
    where
        I: IntoIterator<Item = Override>,
    {
        Ok(merge(self.load(source)?, overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, MockStdin};
    use serde_json::json;

    fn stdin_loader(format: &str, content: &str) -> DataLoader<MockStdin> {
        DataLoader::new()
            .format(Some(format.to_string()))
            .with_stdin(MockStdin::piped(content))
    }

    #[test]
    fn no_source_is_empty_context() {
        let context = DataLoader::new().load(None).unwrap();
        assert!(context.is_empty());
    }

    #[test]
    fn no_source_ignores_format() {
        let context = DataLoader::new()
            .format(Some("frobnicate".to_string()))
            .load(None)
            .unwrap();
        assert!(context.is_empty());
    }

    #[test]
    fn stdin_needs_explicit_format() {
        let err = DataLoader::new()
            .with_stdin(MockStdin::piped("{}"))
            .load(Some(&DataSource::Stdin))
            .unwrap_err();
        assert!(matches!(err, LoadError::Config(ConfigError::NoFormat)));
    }

    #[test]
    fn stdin_json() {
        let context = stdin_loader("json", r#"{"name": "World"}"#)
            .load(Some(&DataSource::Stdin))
            .unwrap();
        assert_eq!(json!(context), json!({"name": "World"}));
    }

    #[test]
    fn tabular_data_is_wrapped() {
        let context = stdin_loader("csv", "a,b\n1,2\n")
            .load(Some(&DataSource::Stdin))
            .unwrap();
        assert_eq!(json!(context), json!({"data": [{"a": "1", "b": "2"}]}));
    }

    #[test]
    fn headers_can_be_disabled() {
        let context = stdin_loader("csv", "a,b\n1,2\n")
            .has_headers(false)
            .load(Some(&DataSource::Stdin))
            .unwrap();
        assert_eq!(json!(context), json!({"data": [["a", "b"], ["1", "2"]]}));
    }

    #[test]
    fn registered_dialect_is_selectable() {
        let context = stdin_loader("csv.pipes", "a|b\n1|2\n")
            .register_dialect("pipes", Dialect::escaped(b'|'))
            .load(Some(&DataSource::Stdin))
            .unwrap();
        assert_eq!(json!(context), json!({"data": [{"a": "1", "b": "2"}]}));
    }

    #[test]
    fn unknown_dialect_is_config_error() {
        let err = stdin_loader("csv.pipes", "a|b\n")
            .load(Some(&DataSource::Stdin))
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Config(ConfigError::UnknownDialect(ref name)) if name == "pipes"
        ));
    }

    #[test]
    fn malformed_data_names_the_format() {
        let err = stdin_loader("json", r#"{"name": "#)
            .load(Some(&DataSource::Stdin))
            .unwrap_err();
        match err {
            LoadError::Data(DataError { format, .. }) => assert_eq!(format, Format::Json),
            other => panic!("expected a data error, got {other:?}"),
        }
    }

    #[test]
    fn overrides_win_over_data() {
        let context = stdin_loader("json", r#"{"name": "World", "n": 1}"#)
            .load_with_overrides(
                Some(&DataSource::Stdin),
                [Override::new("name", "Rust"), Override::new("extra", "x")],
            )
            .unwrap();
        assert_eq!(json!(context), json!({"name": "Rust", "n": 1, "extra": "x"}));
    }

    #[test]
    fn overrides_apply_without_data() {
        let context = DataLoader::new()
            .load_with_overrides(None, [Override::new("name", "World")])
            .unwrap();
        assert_eq!(json!(context), json!({"name": "World"}));
    }
}
