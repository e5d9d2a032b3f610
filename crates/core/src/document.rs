//! Flat JSON documents: the persisted form of a record.
//!
//! Readers distinguish two failure kinds:
//! - a key that is missing or holds the wrong JSON type is a [`RecordError::Format`];
//! - a string that should hold a typed value but does not parse is a [`RecordError::Parse`].

use core::str::FromStr;

use serde_json::Value;

use crate::error::{RecordError, RecordResult};
use crate::value_object::ValueObject;

/// One serialized record.
pub type Document = serde_json::Map<String, Value>;

/// Key holding the explicit variant tag.
pub const TAG_FIELD: &str = "tipo";

/// Human-readable JSON type name, for error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field<'a>(doc: &'a Document, key: &str) -> RecordResult<&'a Value> {
    doc.get(key)
        .ok_or_else(|| RecordError::format(format!("missing field `{key}`")))
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> RecordError {
    RecordError::format(format!(
        "field `{key}` must be {expected}, found {}",
        json_type(found)
    ))
}

pub fn str_field(doc: &Document, key: &str) -> RecordResult<String> {
    match field(doc, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(wrong_type(key, "a string", other)),
    }
}

pub fn list_field(doc: &Document, key: &str) -> RecordResult<Vec<String>> {
    let items = match field(doc, key)? {
        Value::Array(items) => items,
        other => return Err(wrong_type(key, "an array of strings", other)),
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(wrong_type(key, "an array of strings", other)),
        })
        .collect()
}

/// A JSON number, or a string holding one.
pub fn number_field(doc: &Document, key: &str) -> RecordResult<f64> {
    match field(doc, key)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| RecordError::parse(format!("field `{key}`: {n} is not representable"))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            RecordError::parse(format!("field `{key}`: {s:?} is not a number"))
        }),
        other => Err(wrong_type(key, "a number", other)),
    }
}

/// A non-negative integer (JSON number or numeric string).
///
/// Negative or oversized values are validation failures: the text parsed,
/// the value is just not allowed.
pub fn count_field(doc: &Document, key: &str) -> RecordResult<u32> {
    let value: i64 = match field(doc, key)? {
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => i64::try_from(u).unwrap_or(i64::MAX),
            (None, Some(i)) => i,
            (None, None) => {
                return Err(RecordError::parse(format!(
                    "field `{key}`: {n} is not an integer"
                )));
            }
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            RecordError::parse(format!("field `{key}`: {s:?} is not an integer"))
        })?,
        other => return Err(wrong_type(key, "an integer", other)),
    };

    u32::try_from(value).map_err(|_| {
        RecordError::validation(format!("`{key}` must be an integer >= 0 (got {value})"))
    })
}

/// A string field parsed into a value object (dates, timestamps).
pub fn parsed_field<T>(doc: &Document, key: &str) -> RecordResult<T>
where
    T: ValueObject + FromStr<Err = RecordError>,
{
    str_field(doc, key)?.parse::<T>()
}
