//! `shopkeep-store`: the in-memory record collection and its JSON file.
//!
//! A [`CollectionStore`] is generic over any [`shopkeep_core::Record`]; the
//! sales and inventory books are both `CollectionStore`s configured through
//! [`StoreConfig`].

pub mod collection;
pub mod config;
pub mod file;

pub use collection::{CollectionStore, LoadReport, SkippedRecord};
pub use config::{ConfigError, LoadMode, PersistencePolicy, StoreConfig};

#[cfg(test)]
mod test_support;
