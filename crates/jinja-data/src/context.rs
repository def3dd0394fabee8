//! Template context assembly.
//!
//! Every parser produces a [`Value`] tree, but templates are rendered against a
//! [`Context`]: a single top-level mapping. [`normalize`] closes that gap and
//! [`merge`] layers command-line overrides on top.

/// A parsed value tree: scalars, sequences and string-keyed mappings.
pub type Value = serde_json::Value;

/// The top-level mapping handed to the template engine.
pub type Context = serde_json::Map<String, Value>;

/// Key under which non-mapping data is exposed to templates.
pub const DATA_KEY: &str = "data";

/// A `key value` pair given on the command line.
///
/// Values are always strings and keys are always top-level names; no dotted
/// paths, no type coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub key: String,
    pub value: String,
}

impl Override {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Override {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Turns any parsed value into a context.
///
/// Mappings are returned as they are. Anything else, such as the row list of a
/// tabular file or a bare scalar, is wrapped as `{"data": value}`.
pub fn normalize(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        other => {
            tracing::info!(
                "input doesn't provide top-level keys; using '{}'",
                DATA_KEY
            );
            let mut context = Context::new();
            context.insert(DATA_KEY.to_string(), other);
            context
        }
    }
}

/// Applies overrides to a context, in order. Later entries win.
pub fn merge<I>(mut base: Context, overrides: I) -> Context
where
    I: IntoIterator<Item = Override>,
{
    for Override { key, value } in overrides {
        tracing::debug!(key = %key, "override");
        base.insert(key, Value::String(value));
    }
    base
}
