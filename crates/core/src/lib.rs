//! `shopkeep-core`: record building blocks.
//!
//! This crate contains the record model shared by the sales and inventory
//! books: the [`Record`] trait, the error taxonomy, date value objects and
//! the document mapping helpers. No file I/O happens here.

pub mod document;
pub mod error;
pub mod fields;
pub mod record;
pub mod value_object;

pub use document::{Document, TAG_FIELD};
pub use error::{RecordError, RecordResult};
pub use fields::{RawFields, raw_fields};
pub use record::{Record, deserialize, serialize};
pub use value_object::{ExpiryDate, Timestamp, ValueObject};
