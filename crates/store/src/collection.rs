//! Ordered, index-addressed record collection with JSON persistence.

use std::path::Path;

use shopkeep_core::{Document, Record, RecordError, RecordResult, deserialize, serialize};

use crate::config::{LoadMode, PersistencePolicy, StoreConfig};
use crate::file;

/// An element of a loaded file that was not accepted.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the element in the file's array.
    pub position: usize,
    pub error: RecordError,
}

/// Outcome of a successful `load`.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of records added to the collection.
    pub loaded: usize,
    /// Elements that matched no known shape or failed to decode.
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// In-memory collection of records.
///
/// Positions are 0-based and not stable: removing a record shifts every
/// record after it down by one. The store owns its records outright.
///
/// Mutations always apply in memory first. Under
/// [`PersistencePolicy::AfterEveryMutation`] the bound file is then
/// rewritten, and a write failure is returned as [`RecordError::Io`] even
/// though the in-memory change stands.
#[derive(Debug, Clone)]
pub struct CollectionStore<R> {
    records: Vec<R>,
    config: StoreConfig,
}

impl<R: Record> Default for CollectionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> CollectionStore<R> {
    /// Empty store with on-demand persistence and no bound file.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Empty store with the given configuration (nothing is read).
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            records: Vec::new(),
            config,
        }
    }

    /// Build a store and load its bound file, if any.
    ///
    /// A bound file that does not exist yet is not an error: the store starts
    /// empty and the file is created by the first save.
    pub fn open(config: StoreConfig) -> RecordResult<(Self, LoadReport)> {
        let mut store = Self::with_config(config);
        let Some(path) = store.config.path.clone() else {
            return Ok((store, LoadReport::default()));
        };

        match store.load(&path) {
            Ok(report) => Ok((store, report)),
            Err(RecordError::FileNotFound(_)) => {
                tracing::warn!(path = %path.display(), "{} file not found; starting empty", R::NOUN);
                Ok((store, LoadReport::default()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Position of the first record matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&R) -> bool) -> Option<usize> {
        self.records.iter().position(predicate)
    }

    /// Append a record and return its position.
    pub fn add(&mut self, record: R) -> RecordResult<usize> {
        self.records.push(record);
        let index = self.records.len() - 1;
        tracing::debug!(index, "{} added", R::NOUN);
        self.after_mutation()?;
        Ok(index)
    }

    /// Remove and return the record at `index`.
    pub fn remove_at(&mut self, index: usize) -> RecordResult<R> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        tracing::debug!(index, "{} removed", R::NOUN);
        self.after_mutation()?;
        Ok(removed)
    }

    /// Overwrite the record at `index`, returning the previous one.
    pub fn replace_at(&mut self, index: usize, record: R) -> RecordResult<R> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.records[index], record);
        tracing::debug!(index, "{} replaced", R::NOUN);
        self.after_mutation()?;
        Ok(previous)
    }

    /// Set one named field of the record at `index` from raw input.
    ///
    /// The record is left untouched unless the new value parses and the
    /// updated record still validates.
    pub fn update_field(&mut self, index: usize, name: &str, raw: &str) -> RecordResult<()> {
        self.check_index(index)?;
        let mut updated = self.records[index].clone();
        updated.set_field(name, raw)?;
        updated.validate()?;
        self.records[index] = updated;
        tracing::debug!(index, field = name, "{} updated", R::NOUN);
        self.after_mutation()
    }

    /// Remove every record matching `predicate`; returns how many were removed.
    pub fn remove_where(&mut self, predicate: impl Fn(&R) -> bool) -> RecordResult<usize> {
        let before = self.records.len();
        self.records.retain(|r| !predicate(r));
        let removed = before - self.records.len();
        if removed > 0 {
            tracing::debug!(removed, "{} records removed", R::NOUN);
            self.after_mutation()?;
        }
        Ok(removed)
    }

    /// Serialized records, in collection order.
    pub fn list(&self) -> Vec<Document> {
        self.records.iter().map(serialize).collect()
    }

    /// Write the whole collection to `path` as a JSON array, replacing the file.
    ///
    /// Not atomic: a failed write can leave a truncated file.
    pub fn save(&self, path: &Path) -> RecordResult<()> {
        file::write_array(path, self.list())?;
        tracing::info!(path = %path.display(), count = self.records.len(), "{} records saved", R::NOUN);
        Ok(())
    }

    /// Save to the bound file.
    pub fn persist(&self) -> RecordResult<()> {
        match &self.config.path {
            Some(path) => self.save(path),
            None => Err(RecordError::validation(format!(
                "no {} file configured; save to an explicit path instead",
                R::NOUN
            ))),
        }
    }

    /// Read records from a JSON array file.
    ///
    /// Elements that fail to decode are skipped and listed in the report.
    /// A missing file or a file that is not a JSON array fails the whole call
    /// and leaves the collection unchanged. Loading never triggers an auto-save.
    pub fn load(&mut self, path: &Path) -> RecordResult<LoadReport> {
        let items = file::read_array(path)?;

        let mut report = LoadReport::default();
        let mut loaded = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            match deserialize::<R>(item) {
                Ok(record) => loaded.push(record),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        position,
                        kind = error.kind(),
                        "skipping {}: {error}",
                        R::NOUN
                    );
                    report.skipped.push(SkippedRecord { position, error });
                }
            }
        }
        report.loaded = loaded.len();

        match self.config.load_mode {
            LoadMode::Replace => self.records = loaded,
            LoadMode::Append => self.records.extend(loaded),
        }

        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "{} records loaded",
            R::NOUN
        );
        Ok(report)
    }

    fn check_index(&self, index: usize) -> RecordResult<()> {
        if index >= self.records.len() {
            return Err(RecordError::out_of_range(index, self.records.len()));
        }
        Ok(())
    }

    fn after_mutation(&self) -> RecordResult<()> {
        match self.config.policy {
            PersistencePolicy::OnDemand => Ok(()),
            PersistencePolicy::AfterEveryMutation => self.persist(),
        }
    }
}
