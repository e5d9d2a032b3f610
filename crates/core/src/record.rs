//! Record trait: a closed set of variants sharing a common field set.

use serde_json::Value;

use crate::document::{Document, TAG_FIELD, json_type};
use crate::error::{RecordError, RecordResult};
use crate::fields::RawFields;

/// A persisted entity with a variant tag.
///
/// Implementors are plain values: a struct holding the common fields plus an
/// enum for the variant-specific part. The trait supplies the schema the
/// store needs (tags, field names, validation) and the two halves of the
/// document mapping; [`serialize`] and [`deserialize`] handle the tag.
pub trait Record: Clone + PartialEq + core::fmt::Debug {
    /// Singular noun used in logs and messages ("sale", "item").
    const NOUN: &'static str;

    /// Every tag this type can carry.
    const VARIANT_TAGS: &'static [&'static str];

    /// Tag written to [`TAG_FIELD`] for this record.
    fn variant_tag(&self) -> &'static str;

    /// Build a record of `variant` from raw user input.
    ///
    /// Missing fields and values of the wrong semantic type are
    /// [`RecordError::Validation`].
    fn create(variant: &str, fields: &RawFields) -> RecordResult<Self>;

    /// Check the construction rules against the current field values.
    fn validate(&self) -> RecordResult<()>;

    /// Field names that [`Record::set_field`] accepts for this record's variant.
    fn field_names(&self) -> &'static [&'static str];

    /// Overwrite one named field from raw input.
    ///
    /// Unknown names, and names belonging to another variant, are rejected.
    fn set_field(&mut self, name: &str, raw: &str) -> RecordResult<()>;

    /// Write common and variant fields (the tag is written by [`serialize`]).
    fn write_fields(&self, doc: &mut Document);

    /// Read a record of an already-resolved `variant` from a document.
    fn read_fields(variant: &'static str, doc: &Document) -> RecordResult<Self>;

    /// Variant for documents that carry no tag, decided by which keys are present.
    fn infer_variant(_doc: &Document) -> Option<&'static str> {
        None
    }
}

/// Reject `name` unless `record` lists it in [`Record::field_names`].
pub fn ensure_known_field<R: Record>(record: &R, name: &str) -> RecordResult<()> {
    if record.field_names().contains(&name) {
        return Ok(());
    }
    Err(RecordError::validation(format!(
        "unknown field `{name}` for {} (expected one of: {})",
        record.variant_tag(),
        record.field_names().join(", ")
    )))
}

/// Resolve a caller-supplied variant name to one of `R`'s tags.
pub fn resolve_variant<R: Record>(variant: &str) -> Option<&'static str> {
    R::VARIANT_TAGS.iter().copied().find(|tag| *tag == variant)
}

/// Serialize a record into a flat, tagged document.
pub fn serialize<R: Record>(record: &R) -> Document {
    let mut doc = Document::new();
    doc.insert(
        TAG_FIELD.to_string(),
        Value::String(record.variant_tag().to_string()),
    );
    record.write_fields(&mut doc);
    doc
}

/// Deserialize a record from a JSON value produced by [`serialize`].
///
/// Dispatches on the explicit tag; untagged documents fall back to
/// [`Record::infer_variant`]. The decoded record is validated before it is
/// returned.
pub fn deserialize<R: Record>(value: &Value) -> RecordResult<R> {
    let doc = match value {
        Value::Object(doc) => doc,
        other => {
            return Err(RecordError::format(format!(
                "expected a {} object, found {}",
                R::NOUN,
                json_type(other)
            )));
        }
    };

    let variant = match doc.get(TAG_FIELD) {
        Some(Value::String(tag)) => resolve_variant::<R>(tag).ok_or_else(|| {
            RecordError::format(format!("unknown {} variant {tag:?}", R::NOUN))
        })?,
        Some(other) => {
            return Err(RecordError::format(format!(
                "field `{TAG_FIELD}` must be a string, found {}",
                json_type(other)
            )));
        }
        None => R::infer_variant(doc).ok_or_else(|| {
            RecordError::format(format!(
                "{} document has no `{TAG_FIELD}` tag and matches no known variant",
                R::NOUN
            ))
        })?,
    };

    let record = R::read_fields(variant, doc)?;
    record.validate()?;
    Ok(record)
}
