//! File-backed ingredient record store.
//!
//! The persisted file is the single source of truth. Every call re-reads it in full, so
//! edits made by other processes are picked up on the next operation. Mutations within
//! this process are serialized by a writer lock; across processes the file is
//! last-write-wins.

use super::atomic::{atomic_read_json, atomic_write_json};
use crate::models::IngredientRecord;
use crate::{LarderError, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Result of an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Added,
    AlreadyExists,
}

/// Ordered, case-insensitively unique set of ingredient records persisted as JSON.
pub struct RecordStore {
    path: PathBuf,
    keep_backup: bool,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Keep a `.bak` copy of the previous file on every rewrite.
    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with an empty set if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.persist(&[])?;
        info!("Created empty ingredient store at {}", self.path.display());
        Ok(())
    }

    /// Read the full persisted set. A missing file is an empty set.
    pub fn load_all(&self) -> Result<Vec<IngredientRecord>> {
        let records = atomic_read_json::<Vec<IngredientRecord>>(&self.path)
            .map_err(|e| self.unavailable(e))?
            .unwrap_or_default();
        debug!(
            "Loaded {} ingredient(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Read the full set under the writer lock and pass it to `then` before releasing it.
    ///
    /// Anything `then` derives from the records (an index snapshot, say) is installed in the
    /// same order as the reads, so it can never overwrite the result of a later mutation.
    pub fn load_then<T>(
        &self,
        then: impl FnOnce(&[IngredientRecord]) -> T,
    ) -> Result<(Vec<IngredientRecord>, T)> {
        let _guard = self.lock()?;
        let records = self.load_all()?;
        let derived = then(&records);
        Ok((records, derived))
    }

    /// Append a record unless a case-insensitive name collision exists.
    ///
    /// Returns the set as persisted after the call.
    pub fn append(&self, record: IngredientRecord) -> Result<(AppendOutcome, Vec<IngredientRecord>)> {
        self.append_then(record, |_| {})
    }

    /// [`append`](Self::append), calling `then` with the resulting set while the writer lock
    /// is still held.
    pub fn append_then(
        &self,
        record: IngredientRecord,
        then: impl FnOnce(&[IngredientRecord]),
    ) -> Result<(AppendOutcome, Vec<IngredientRecord>)> {
        let _guard = self.lock()?;
        let mut records = self.load_all()?;

        if records.iter().any(|r| r.name_matches(&record.name)) {
            debug!("Ingredient '{}' already exists, skipping append", record.name);
            then(&records);
            return Ok((AppendOutcome::AlreadyExists, records));
        }

        info!("Adding ingredient '{}'", record.name);
        records.push(record);
        self.persist(&records)?;
        then(&records);
        Ok((AppendOutcome::Added, records))
    }

    /// Remove the first record whose name matches case-insensitively.
    ///
    /// Returns whether a record was removed and the set as persisted after the call.
    pub fn remove_by_name(&self, name: &str) -> Result<(bool, Vec<IngredientRecord>)> {
        self.remove_by_name_then(name, |_| {})
    }

    /// [`remove_by_name`](Self::remove_by_name), calling `then` with the resulting set while
    /// the writer lock is still held.
    pub fn remove_by_name_then(
        &self,
        name: &str,
        then: impl FnOnce(&[IngredientRecord]),
    ) -> Result<(bool, Vec<IngredientRecord>)> {
        let _guard = self.lock()?;
        let mut records = self.load_all()?;

        let Some(position) = records.iter().position(|r| r.name_matches(name)) else {
            debug!("No ingredient named '{}' to remove", name);
            then(&records);
            return Ok((false, records));
        };

        let removed = records.remove(position);
        info!("Removed ingredient '{}'", removed.name);
        self.persist(&records)?;
        then(&records);
        Ok((true, records))
    }

    fn persist(&self, records: &[IngredientRecord]) -> Result<()> {
        atomic_write_json(&self.path, &records, self.keep_backup).map_err(|e| self.unavailable(e))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| LarderError::Other("Failed to acquire store write lock".to_string()))
    }

    fn unavailable(&self, err: LarderError) -> LarderError {
        LarderError::store(err.to_string(), &self.path)
    }
}
