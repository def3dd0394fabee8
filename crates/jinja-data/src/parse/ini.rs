//! INI data.
//!
//! The result maps each section name to its keys. Keys from the `[DEFAULT]`
//! section are visible in every other section unless the section sets them
//! itself; `[DEFAULT]` does not appear in the result on its own.
//!
//! ```ini
//! [DEFAULT]
//! host = localhost
//!
//! [web]
//! port = 8080
//! url = http://%(host)s:%(port)s/
//! ```
//!
//! gives `{"web": {"host": "localhost", "port": "8080", "url": "http://localhost:8080/"}}`.
//!
//! Syntax:
//!
//! - `key = value` or `key: value`; the first delimiter splits, both sides are
//!   trimmed and keys are lower-cased
//! - a section header runs from `[` to the last `]` on its line
//! - whole-line comments start with `#` or `;`
//! - indented lines continue the previous value, joined with `\n`; a blank line
//!   ends the value
//! - `%(name)s` expands to another key of the same section (or the defaults),
//!   `%%` is a literal percent sign
//!
//! Everything stays a string.

use std::io::Read;

use crate::{Context, ParseError, Value};

pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Parses an INI document.
pub fn parse<R: Read>(mut reader: R) -> Result<Value, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let document = Document::parse(&source)?;
    document.into_value()
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
    line: usize,
}

#[derive(Debug, Default)]
struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Defaults,
    Section(usize),
}

#[derive(Debug, Default)]
struct Document {
    defaults: Section,
    sections: Vec<Section>,
}

impl Document {
    fn parse(source: &str) -> Result<Self, ParseError> {
        let mut document = Document::default();
        let mut seen_defaults = false;
        let mut target: Option<Target> = None;
        // Entry that an indented line would continue.
        let mut open_entry: Option<usize> = None;

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                open_entry = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(char::is_whitespace);
            if let (true, Some(entry), Some(current)) = (indented, open_entry, target) {
                let value = &mut document.section_mut(current).entries[entry].value;
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(trimmed);
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                // The name runs to the last `]`; anything after it is ignored.
                let name = header
                    .rfind(']')
                    .map(|end| &header[..end])
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| ParseError::ini(line, format!("malformed section header {trimmed:?}")))?;

                target = Some(if name == DEFAULT_SECTION {
                    if seen_defaults {
                        return Err(ParseError::ini(line, format!("duplicate section '{name}'")));
                    }
                    seen_defaults = true;
                    Target::Defaults
                } else {
                    if document.sections.iter().any(|section| section.name == name) {
                        return Err(ParseError::ini(line, format!("duplicate section '{name}'")));
                    }
                    document.sections.push(Section {
                        name: name.to_string(),
                        entries: Vec::new(),
                    });
                    Target::Section(document.sections.len() - 1)
                });
                open_entry = None;
                continue;
            }

            let current = target
                .ok_or_else(|| ParseError::ini(line, "key outside of any section"))?;
            let split = trimmed
                .find(['=', ':'])
                .ok_or_else(|| ParseError::ini(line, format!("expected 'key = value', found {trimmed:?}")))?;
            let key = trimmed[..split].trim().to_lowercase();
            let value = trimmed[split + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ParseError::ini(line, "empty key"));
            }

            let section = document.section_mut(current);
            if section.get(&key).is_some() {
                return Err(ParseError::ini(
                    line,
                    format!("duplicate key '{key}' in section '{}'", section_label(current, section)),
                ));
            }
            section.entries.push(Entry { key, value, line });
            open_entry = Some(section.entries.len() - 1);
        }

        Ok(document)
    }

    fn section_mut(&mut self, target: Target) -> &mut Section {
        match target {
            Target::Defaults => &mut self.defaults,
            Target::Section(index) => &mut self.sections[index],
        }
    }

    fn into_value(self) -> Result<Value, ParseError> {
        let mut result = Context::new();
        for section in &self.sections {
            let visible = overlay(&self.defaults.entries, &section.entries);
            let mut fields = Context::new();
            for entry in &visible {
                fields.insert(entry.key.clone(), Value::String(interpolate(entry, &visible)?));
            }
            result.insert(section.name.clone(), Value::Object(fields));
        }
        Ok(Value::Object(result))
    }
}

fn section_label(target: Target, section: &Section) -> &str {
    match target {
        Target::Defaults => DEFAULT_SECTION,
        Target::Section(_) => &section.name,
    }
}

/// Defaults first, replaced in place by section keys, then section-only keys.
fn overlay(defaults: &[Entry], own: &[Entry]) -> Vec<Entry> {
    let mut visible: Vec<Entry> = defaults
        .iter()
        .map(|default| {
            own.iter()
                .find(|entry| entry.key == default.key)
                .unwrap_or(default)
                .clone()
        })
        .collect();
    visible.extend(
        own.iter()
            .filter(|entry| !defaults.iter().any(|default| default.key == entry.key))
            .cloned(),
    );
    visible
}

fn interpolate(entry: &Entry, visible: &[Entry]) -> Result<String, ParseError> {
    let mut out = String::with_capacity(entry.value.len());
    expand(&entry.value, visible, 1, entry.line, &mut out)?;
    Ok(out)
}

fn expand(
    value: &str,
    visible: &[Entry],
    depth: usize,
    line: usize,
    out: &mut String,
) -> Result<(), ParseError> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(ParseError::ini(line, "interpolation nested too deeply"));
    }

    let mut rest = value;
    while let Some(percent) = rest.find('%') {
        out.push_str(&rest[..percent]);
        rest = &rest[percent..];

        if let Some(after) = rest.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if rest.starts_with("%(") {
            let close = rest
                .find(')')
                .filter(|&close| close > 2 && rest[close + 1..].starts_with('s'))
                .ok_or_else(|| {
                    ParseError::ini(line, format!("bad interpolation variable reference {rest:?}"))
                })?;
            let name = rest[2..close].to_lowercase();
            rest = &rest[close + 2..];

            let referenced = visible
                .iter()
                .find(|entry| entry.key == name)
                .ok_or_else(|| ParseError::ini(line, format!("missing interpolation key '{name}'")))?;
            if referenced.value.contains('%') {
                expand(&referenced.value, visible, depth + 1, line, out)?;
            } else {
                out.push_str(&referenced.value);
            }
        } else {
            return Err(ParseError::ini(
                line,
                format!("'%' must be followed by '%' or '(', found {rest:?}"),
            ));
        }
    }
    out.push_str(rest);
    Ok(())
}
