//! YAML data.
//!
//! Only plain YAML is accepted: tagged values are rejected instead of being
//! handed to a constructor. Mapping keys must be scalars and are turned into
//! strings, since a context is keyed by name. Merge keys (`<<: *anchor`) are
//! resolved before conversion.

use std::io::Read;

use serde_yaml::Value as Yaml;

use crate::{Context, ParseError, Value};

/// Parses a single YAML document.
pub fn parse<R: Read>(mut reader: R) -> Result<Value, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    if source.trim().is_empty() {
        return Ok(Value::Null);
    }
    let mut document: Yaml = serde_yaml::from_str(&source)?;
    document.apply_merge()?;
    convert(document)
}

fn convert(value: Yaml) -> Result<Value, ParseError> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => convert_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => {
            Value::Array(items.into_iter().map(convert).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(mapping) => {
            let mut map = Context::new();
            for (key, value) in mapping {
                map.insert(convert_key(key)?, convert(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => {
            return Err(ParseError::Unsupported(format!(
                "unsupported YAML tag {}",
                tagged.tag
            )))
        }
    })
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // NaN and infinities have no JSON number form.
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn convert_key(key: Yaml) -> Result<String, ParseError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => Err(ParseError::Unsupported(format!(
            "unsupported YAML tag {}",
            tagged.tag
        ))),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(ParseError::Unsupported(
            "mapping keys must be scalars".to_string(),
        )),
    }
}
