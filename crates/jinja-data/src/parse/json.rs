//! JSON data.

use std::io::Read;

use crate::{ParseError, Value};

/// Parses a JSON document, keeping its native types and key order.
pub fn parse<R: Read>(reader: R) -> Result<Value, ParseError> {
    Ok(serde_json::from_reader(reader)?)
}
