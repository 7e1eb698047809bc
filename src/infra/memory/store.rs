use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::domain::entities::record::Record;
use crate::usecase::ports::source::{RecordSource, Snapshot, SourceError};

/// Versioned copy-on-write record store.
///
/// Writers take the write lock, clone the vector only when a reader still
/// holds the previous snapshot, and bump the version. `list` hands out the
/// current `Arc`, so readers always see a whole write or none of it.
pub struct MemoryStore<R> {
    inner: RwLock<Snapshot<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Snapshot::empty()),
        }
    }

    pub fn with_records(records: Vec<R>) -> Result<Self, SourceError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(SourceError::DuplicateId(record.id().to_string()));
            }
        }
        Ok(Self {
            inner: RwLock::new(Snapshot::new(1, records)),
        })
    }

    fn write<F>(&self, mutate: F) -> Result<(), SourceError>
    where
        F: FnOnce(&mut Vec<R>) -> Result<(), SourceError>,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = &mut *guard;
        // Checks inside `mutate` run before any change, so a rejected write
        // leaves the records untouched.
        mutate(Arc::make_mut(&mut snapshot.records))?;
        snapshot.version += 1;
        debug!(
            "memory store now at version {} with {} records",
            snapshot.version,
            snapshot.records.len()
        );
        Ok(())
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordSource<R> for MemoryStore<R> {
    fn list(&self) -> Result<Snapshot<R>, SourceError> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok((*guard).clone())
    }

    fn version(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .version
    }

    /// New records go to the front, newest first.
    fn add(&self, record: R) -> Result<(), SourceError> {
        self.write(|records| {
            if records.iter().any(|existing| existing.id() == record.id()) {
                return Err(SourceError::DuplicateId(record.id().to_string()));
            }
            records.insert(0, record);
            Ok(())
        })
    }

    fn update(&self, record: R) -> Result<(), SourceError> {
        self.write(|records| {
            let slot = records
                .iter_mut()
                .find(|existing| existing.id() == record.id())
                .ok_or_else(|| SourceError::NotFound(record.id().to_string()))?;
            *slot = record;
            Ok(())
        })
    }
}
