//! Format parsers.
//!
//! One module per data format, each turning a text stream into a [`Value`]
//! tree. [`Parser`] maps a resolved [`Format`] to the function that handles it,
//! looking up tabular dialects up front so that an unknown dialect is reported
//! before any data is read.

pub mod dsv;
pub mod ini;
pub mod json;
pub mod xml;
pub mod yaml;

use std::io::Read;

use crate::{ConfigError, Dialect, DialectRegistry, Format, ParseError, Value};

/// A parser selected for one format.
#[derive(Debug, Clone, Copy)]
pub enum Parser<'a> {
    Ini,
    Json,
    Xml,
    Yaml,
    Dsv {
        dialect: &'a Dialect,
        has_headers: bool,
    },
}

impl<'a> Parser<'a> {
    /// Selects the parser for `format`.
    ///
    /// Tabular formats resolve their dialect in `dialects`; `has_headers` is
    /// ignored by every other format.
    pub fn for_format(
        format: &Format,
        dialects: &'a DialectRegistry,
        has_headers: bool,
    ) -> Result<Self, ConfigError> {
        let parser = match format {
            Format::Ini => Parser::Ini,
            Format::Json => Parser::Json,
            Format::Xml => Parser::Xml,
            Format::Yaml => Parser::Yaml,
            Format::Tsv | Format::Csv | Format::Dsv(_) => {
                let name = format.dialect().unwrap_or_default();
                let dialect = dialects
                    .get(name)
                    .ok_or_else(|| ConfigError::UnknownDialect(name.to_string()))?;
                Parser::Dsv {
                    dialect,
                    has_headers,
                }
            }
        };
        Ok(parser)
    }

    /// Parses the whole stream.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Value, ParseError> {
        match *self {
            Parser::Ini => ini::parse(reader),
            Parser::Json => json::parse(reader),
            Parser::Xml => xml::parse(reader),
            Parser::Yaml => yaml::parse(reader),
            Parser::Dsv {
                dialect,
                has_headers,
            } => dsv::parse(reader, dialect, has_headers),
        }
    }
}
