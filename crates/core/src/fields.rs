//! Raw field input: string values collected from a user, checked at construction time.
//!
//! Everything here fails with [`RecordError::Validation`]; a bad value typed
//! into a prompt is a validation problem, not a file-format problem.

use core::str::FromStr;
use std::collections::BTreeMap;

use crate::error::{RecordError, RecordResult};
use crate::value_object::ValueObject;

/// Raw field values keyed by their on-disk field name (`"cliente"`, `"precio"`, ...).
pub type RawFields = BTreeMap<String, String>;

/// Build a [`RawFields`] map from `(name, value)` pairs.
pub fn raw_fields<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> RawFields {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Fetch a required field; blank values count as missing.
pub fn required<'a>(fields: &'a RawFields, name: &str) -> RecordResult<&'a str> {
    match fields.get(name).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RecordError::validation(format!(
            "missing required field `{name}`"
        ))),
    }
}

pub fn ensure_not_blank(name: &str, value: &str) -> RecordResult<()> {
    if value.trim().is_empty() {
        return Err(RecordError::validation(format!("`{name}` cannot be empty")));
    }
    Ok(())
}

/// Prices must be finite and non-negative.
pub fn ensure_price(name: &str, value: f64) -> RecordResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::validation(format!(
            "`{name}` must be a number >= 0 (got {value})"
        )));
    }
    Ok(())
}

pub fn parse_price(name: &str, raw: &str) -> RecordResult<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        RecordError::validation(format!("`{name}` must be a number (got {raw:?})"))
    })?;
    ensure_price(name, value)?;
    Ok(value)
}

/// Non-negative integer counts (quantities, warranty months).
pub fn parse_count(name: &str, raw: &str) -> RecordResult<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        RecordError::validation(format!(
            "`{name}` must be an integer >= 0 (got {raw:?})"
        ))
    })
}

/// Comma-separated list; entries are trimmed and empty entries dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a value object from raw input, reporting failures as validation errors.
pub fn parse_value<T>(name: &str, raw: &str) -> RecordResult<T>
where
    T: ValueObject + FromStr<Err = RecordError>,
{
    raw.parse::<T>().map_err(|e| match e {
        RecordError::Parse(msg) => RecordError::validation(format!("`{name}`: {msg}")),
        other => other,
    })
}
