//! XML data.
//!
//! Elements are folded into mappings the conventional way:
//!
//! - the document becomes `{root_name: root}`
//! - an element with neither attributes nor child elements becomes its
//!   trimmed text, or `null` when there is none
//! - otherwise it becomes a mapping holding attributes as `@name`, child
//!   elements under their tag name and trimmed text under `#text`
//! - a tag repeated among siblings becomes a sequence, in document order
//!
//! ```text
//! <list kind="todo">          {"list": {
//!   <item>one</item>    =>      "@kind": "todo",
//!   <item>two</item>            "item": ["one", "two"]
//! </list>                     }}
//! ```

use std::io::Read;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Context, ParseError, Value};

pub const ATTRIBUTE_PREFIX: &str = "@";
pub const TEXT_KEY: &str = "#text";

/// Parses an XML document.
pub fn parse<R: Read>(mut reader: R) -> Result<Value, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    from_str(&source)
}

/// Parses an XML document held in memory.
pub fn from_str(source: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                check_single_root(&stack, &root)?;
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                check_single_root(&stack, &root)?;
                let element = Element::open(&start)?;
                attach(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unexpected closing tag".to_string()))?;
                attach(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| ParseError::Xml(format!("invalid text content: {}", err)))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|err| ParseError::Xml(format!("invalid CDATA content: {}", err)))?;
                push_text(&mut stack, text)?;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Xml(format!(
            "unexpected end of document: <{}> is not closed",
            open.name
        )));
    }

    let (name, value) = root.ok_or_else(|| ParseError::Xml("no element found".to_string()))?;
    let mut document = Context::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// An element whose closing tag has not been seen yet.
struct Element {
    name: String,
    fields: Context,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut fields = Context::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref());
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::Xml(format!("invalid attribute value: {}", err)))?;
            fields.insert(
                format!("{}{}", ATTRIBUTE_PREFIX, key),
                Value::String(value.into_owned()),
            );
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.fields.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }

    fn finish(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.fields.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

fn check_single_root(stack: &[Element], root: &Option<(String, Value)>) -> Result<(), ParseError> {
    if stack.is_empty() && root.is_some() {
        return Err(ParseError::Xml(
            "junk after document element: multiple root elements".to_string(),
        ));
    }
    Ok(())
}

fn attach(element: Element, stack: &mut [Element], root: &mut Option<(String, Value)>) {
    let (name, value) = element.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::Xml(
            "text outside of the root element".to_string(),
        )),
    }
}
