//! Data ingestion and context assembly for the `jinja` command line renderer.
//!
//! `jinja-data` turns a data file (ini, json, xml, yaml or delimiter-separated
//! values) into the single mapping that a template is rendered against, and
//! layers command-line overrides on top.
//!
//! # Pipeline
//!
//! ```text
//! DataSource ──► Format::resolve ──► Parser ──► Value ──► normalize ──► Context ──► merge ──► Context
//!                 (-f or suffix)     (per format)          ({"data": ..})          (-D key value)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use jinja_data::{DataLoader, DataSource, MockStdin};
//!
//! let context = DataLoader::new()
//!     .format(Some("csv".to_string()))
//!     .with_stdin(MockStdin::piped("a,b\n1,2\n"))
//!     .load(Some(&DataSource::Stdin))
//!     .unwrap();
//!
//! // Tabular data has no top-level keys, so it is exposed as `data`.
//! assert_eq!(context["data"][0]["b"], "2");
//! ```
//!
//! # Formats
//!
//! | Suffix  | Format    | Result                                     |
//! |---------|-----------|--------------------------------------------|
//! | `.ini`  | `ini`     | section → key → string                     |
//! | `.json` | `json`    | native                                     |
//! | `.xml`  | `xml`     | element mapping (`@attr`, `#text`)         |
//! | `.yaml` | `yaml`    | native                                     |
//! | `.tsv`  | `tsv`     | rows                                       |
//! | `.csv`  | `csv`     | rows                                       |
//! | -       | `csv.<d>` | rows, using dialect `<d>` from the registry |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (an `info` event when data is wrapped
//! under `data`, `debug` events for the resolved format) and never installs a
//! subscriber itself.

mod context;
mod dialect;
pub mod env;
mod error;
mod format;
mod loader;
pub mod parse;
mod source;

pub use context::{merge, normalize, Context, Override, Value, DATA_KEY};
pub use dialect::{Dialect, DialectRegistry, Quoting};
pub use env::{MockStdin, RealStdin, StdinReader};
pub use error::{ConfigError, DataError, LoadError, ParseError};
pub use format::{Format, DIALECT_PREFIX};
pub use loader::DataLoader;
pub use parse::Parser;
pub use source::{DataSource, STDIO_SENTINEL};
