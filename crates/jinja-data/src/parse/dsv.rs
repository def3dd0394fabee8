//! Delimiter-separated values (csv, tsv and named dialects).
//!
//! Dialects with quoting disabled are split here, one character at a time, so
//! that the escape character can make a delimiter or a line break literal.
//! Quoting dialects are handed to the `csv` crate.
//!
//! Rows may have any number of fields. With headers, a short row fills the
//! missing fields with null and a long row loses its extra fields. A blank
//! line is an empty row without headers and is skipped with headers.

use std::io::Read;
use std::iter;

use crate::{Context, Dialect, ParseError, Quoting, Value};

/// Parses delimiter-separated rows.
///
/// With `has_headers` the first row names the fields and the result is a
/// sequence of mappings; otherwise it is a sequence of string sequences.
pub fn parse<R: Read>(mut reader: R, dialect: &Dialect, has_headers: bool) -> Result<Value, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let records = match dialect.quoting {
        Quoting::None => split_unquoted(&source, dialect)?,
        Quoting::Minimal => split_quoted(&source, dialect)?,
    };
    Ok(if has_headers {
        rows_as_mappings(records)
    } else {
        rows_as_sequences(records)
    })
}

fn split_unquoted(source: &str, dialect: &Dialect) -> Result<Vec<Vec<String>>, ParseError> {
    let delimiter = char::from(dialect.delimiter);
    let escape = dialect.escape.map(char::from);
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if Some(c) == escape {
            match chars.next() {
                Some(literal) => {
                    if literal == '\n' {
                        line += 1;
                    }
                    field.push(literal);
                }
                None if dialect.strict => {
                    return Err(ParseError::dsv(
                        line,
                        "unexpected end of data after escape character",
                    ))
                }
                None => field.push(c),
            }
        } else if c == delimiter {
            record.push(std::mem::take(&mut field));
        } else if c == '\r' || c == '\n' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            line += 1;
            records.push(end_record(&mut record, &mut field));
        } else {
            field.push(c);
        }
    }
    if !record.is_empty() || !field.is_empty() {
        records.push(end_record(&mut record, &mut field));
    }
    Ok(records)
}

/// Closes the current row. A line with no content at all is an empty row.
fn end_record(record: &mut Vec<String>, field: &mut String) -> Vec<String> {
    if record.is_empty() && field.is_empty() {
        return Vec::new();
    }
    record.push(std::mem::take(field));
    std::mem::take(record)
}

fn split_quoted(source: &str, dialect: &Dialect) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .quoting(true)
        .quote(dialect.quote)
        .double_quote(dialect.double_quote)
        .escape(dialect.escape)
        .flexible(true)
        .has_headers(false)
        .from_reader(source.as_bytes());

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        // The csv reader skips blank lines; count them back in.
        let start = reader.position().byte() as usize;
        let more = reader.read_record(&mut record)?;
        records.extend(iter::repeat_with(Vec::new).take(blank_lines(source, start)));
        if !more {
            break;
        }
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Number of empty lines starting at byte `from`, which follows a line end.
fn blank_lines(source: &str, from: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = from;
    // The `\n` of a `\r\n` pair may still be unread.
    if i > 0 && bytes[i - 1] == b'\r' && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }
    let mut count = 0;
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'\r' => {
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            b'\n' => i += 1,
            _ => break,
        }
        count += 1;
    }
    count
}

fn rows_as_mappings(records: Vec<Vec<String>>) -> Value {
    let mut records = records.into_iter().filter(|record| !record.is_empty());
    let Some(headers) = records.next() else {
        return Value::Array(Vec::new());
    };

    let rows = records
        .enumerate()
        .map(|(index, record)| {
            let mut values = record.into_iter();
            let mut row = Context::new();
            for header in &headers {
                row.insert(header.clone(), values.next().map_or(Value::Null, Value::String));
            }
            let extra = values.count();
            if extra > 0 {
                tracing::warn!(row = index + 1, extra, "row has more fields than the header; extra fields dropped");
            }
            Value::Object(row)
        })
        .collect();
    Value::Array(rows)
}

fn rows_as_sequences(records: Vec<Vec<String>>) -> Value {
    Value::Array(
        records
            .into_iter()
            .map(|record| Value::Array(record.into_iter().map(Value::String).collect()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DialectRegistry;
    use serde_json::json;

    fn dsv(source: &str, dialect: &str, has_headers: bool) -> Result<Value, ParseError> {
        let registry = DialectRegistry::default();
        parse(source.as_bytes(), registry.get(dialect).unwrap(), has_headers)
    }

    #[test]
    fn header_rows_become_mappings() {
        let value = dsv("a,b\n1,2\n3,4", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": "2"}, {"a": "3", "b": "4"}]));
    }

    #[test]
    fn without_headers_rows_are_sequences() {
        let value = dsv("a,b\n1,2\n3,4", "csv", false).unwrap();
        assert_eq!(value, json!([["a", "b"], ["1", "2"], ["3", "4"]]));
    }

    #[test]
    fn header_order_is_kept() {
        let value = dsv("z,a,m\n1,2,3\n", "csv", true).unwrap();
        let keys: Vec<_> = value[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn tab_delimited() {
        let value = dsv("name\tage\nAda\t36\n", "tsv", true).unwrap();
        assert_eq!(value, json!([{"name": "Ada", "age": "36"}]));
    }

    #[test]
    fn escaped_delimiter_stays_in_field() {
        let value = dsv("name,title\nAda,Countess\\, mathematician\n", "csv", true).unwrap();
        assert_eq!(value[0]["title"], json!("Countess, mathematician"));
    }

    #[test]
    fn escaped_backslash_and_newline() {
        let value = dsv("path,note\nC:\\\\dir,two\\\nlines\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"path": "C:\\dir", "note": "two\nlines"}]));
    }

    #[test]
    fn quotes_are_data_when_quoting_is_disabled() {
        let value = dsv("a\n\"x\"\n", "csv", true).unwrap();
        assert_eq!(value[0]["a"], json!("\"x\""));
    }

    #[test]
    fn trailing_escape_fails_in_strict_mode() {
        let err = dsv("a,b\n1,2\\", "csv", true).unwrap_err();
        assert!(matches!(err, ParseError::Dsv { line: 2, .. }));
    }

    #[test]
    fn trailing_escape_is_literal_when_not_strict() {
        let registry = DialectRegistry::default();
        let dialect = registry.get("csv").unwrap().clone().strict(false);
        let value = parse("a\nx\\".as_bytes(), &dialect, true).unwrap();
        assert_eq!(value, json!([{"a": "x\\"}]));
    }

    #[test]
    fn short_rows_are_filled_with_null_in_strict_mode() {
        let value = dsv("a,b\n1\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": null}]));
    }

    #[test]
    fn long_rows_lose_extra_fields_in_strict_mode() {
        let value = dsv("a,b\n1,2,3\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": "2"}]));
    }

    #[test]
    fn ragged_rows_without_headers() {
        let value = dsv("a,b\n1\n", "tsv", false).unwrap();
        assert_eq!(value, json!([["a,b"], ["1"]]));
        let value = dsv("a,b\n1\n", "csv", false).unwrap();
        assert_eq!(value, json!([["a", "b"], ["1"]]));
    }

    #[test]
    fn private_use_characters_are_ordinary_data() {
        let value = dsv("a\nx\u{E000}y\u{E001}z\u{E002}\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "x\u{E000}y\u{E001}z\u{E002}"}]));
    }

    #[test]
    fn escaped_carriage_return_stays_in_field() {
        let value = dsv("a\nx\\\ry\n", "csv", false).unwrap();
        assert_eq!(value, json!([["a"], ["x\ry"]]));
    }

    #[test]
    fn blank_lines_are_empty_rows_without_headers() {
        let value = dsv("a,b\n\n1,2\n\n", "csv", false).unwrap();
        assert_eq!(value, json!([["a", "b"], [], ["1", "2"], []]));
    }

    #[test]
    fn blank_lines_are_skipped_with_headers() {
        let value = dsv("\na,b\n\n1,2\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": "2"}]));
    }

    #[test]
    fn quoting_dialect_keeps_blank_lines_without_headers() {
        let value = dsv("\na\n\n\"b\nc\"\n\n", "excel", false).unwrap();
        assert_eq!(value, json!([[], ["a"], [], ["b\nc"], []]));
    }

    #[test]
    fn quoting_dialect_crlf_has_no_blank_rows() {
        let value = dsv("a,b\r\n1,2\r\n\r\n", "excel", false).unwrap();
        assert_eq!(value, json!([["a", "b"], ["1", "2"], []]));
    }

    #[test]
    fn line_with_only_a_delimiter_has_two_empty_fields() {
        assert_eq!(dsv(",\n", "csv", false).unwrap(), json!([["", ""]]));
    }

    #[test]
    fn excel_dialect_understands_quotes() {
        let value = dsv("name,quote\nAda,\"says \"\"hi\"\", then, leaves\"\n", "excel", true).unwrap();
        assert_eq!(value[0]["quote"], json!("says \"hi\", then, leaves"));
    }

    #[test]
    fn lenient_dialect_fills_short_rows_with_null() {
        let value = dsv("a,b,c\n1,2\n", "excel", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": "2", "c": null}]));
    }

    #[test]
    fn lenient_dialect_drops_extra_fields() {
        let value = dsv("a\n1,2\n", "excel", true).unwrap();
        assert_eq!(value, json!([{"a": "1"}]));
    }

    #[test]
    fn crlf_line_endings() {
        let value = dsv("a,b\r\n1,2\r\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": "1", "b": "2"}]));
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert_eq!(dsv("", "csv", true).unwrap(), json!([]));
        assert_eq!(dsv("", "csv", false).unwrap(), json!([]));
    }

    #[test]
    fn header_only_is_empty_sequence() {
        assert_eq!(dsv("a,b\n", "csv", true).unwrap(), json!([]));
    }

    #[test]
    fn fields_are_not_trimmed() {
        let value = dsv("a,b\n 1 , 2\n", "csv", true).unwrap();
        assert_eq!(value, json!([{"a": " 1 ", "b": " 2"}]));
    }
}
