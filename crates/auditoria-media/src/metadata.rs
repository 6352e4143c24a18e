//! Untyped photo metadata and its conversion into JSON-safe documents.
//!
//! Metadata parsers hand back a loose tree of values. Before it can be stored
//! in a JSON column every node is reduced by one rule per kind: binary blobs
//! and empty values go, control characters are stripped from text, dates
//! become ISO-8601 strings.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use auditoria_core::models::media::ExifData;

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Binary(Vec<u8>),
    Date(jiff::Timestamp),
    Array(Vec<MetadataValue>),
    Object(BTreeMap<String, MetadataValue>),
}

/// Sanitize a metadata tree. Returns `None` when nothing storable is left.
pub fn sanitize(tree: BTreeMap<String, MetadataValue>) -> Option<ExifData> {
    let object = sanitize_object(tree);
    if object.is_empty() { None } else { Some(object) }
}

fn sanitize_object(tree: BTreeMap<String, MetadataValue>) -> Map<String, Value> {
    tree.into_iter()
        .filter_map(|(key, value)| sanitize_field(value).map(|v| (key, v)))
        .collect()
}

/// Rule for a value stored under an object key. `None` drops the key.
fn sanitize_field(value: MetadataValue) -> Option<Value> {
    match value {
        MetadataValue::Null | MetadataValue::Binary(_) => None,
        MetadataValue::Bool(b) => Some(Value::Bool(b)),
        MetadataValue::Number(n) => Number::from_f64(n).map(Value::Number),
        MetadataValue::Text(s) => Some(Value::String(strip_control_chars(&s))),
        MetadataValue::Date(ts) => Some(Value::String(ts.to_string())),
        MetadataValue::Array(items) => Some(sanitize_array(items)),
        MetadataValue::Object(nested) => {
            let object = sanitize_object(nested);
            (!object.is_empty()).then_some(Value::Object(object))
        }
    }
}

/// Arrays keep their non-binary entries in order. Entries that cannot be
/// represented become `null` rather than shifting later positions.
fn sanitize_array(items: Vec<MetadataValue>) -> Value {
    let values = items
        .into_iter()
        .filter(|item| !matches!(item, MetadataValue::Binary(_)))
        .map(|item| match item {
            MetadataValue::Object(nested) => Value::Object(sanitize_object(nested)),
            other => sanitize_field(other).unwrap_or(Value::Null),
        })
        .collect();
    Value::Array(values)
}

/// Remove C0 control characters that text/JSON columns reject. Tab, line
/// feed and carriage return are kept.
pub fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}'))
        .collect()
}
