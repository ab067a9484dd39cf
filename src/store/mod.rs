//! Record persistence.
//!
//! The engine does not own storage. Hosts supply a [`RecordStore`] and are
//! expected to make saves atomic with their own transaction. Stores must
//! also serialize concurrent writes to the same record; [`MemoryStore`]
//! does so with optimistic locking on the record's version, which is the
//! property any production store needs to provide.

use crate::core::Record;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub mod error;
pub mod snapshot;

pub use error::{SnapshotError, StoreError};
pub use snapshot::{RecordSnapshot, SNAPSHOT_VERSION};

/// Load and save records.
pub trait RecordStore: Send + Sync {
    /// Load the stored copy of a record.
    fn load(&self, id: Uuid) -> Result<Record, StoreError>;

    /// Persist a record and return the stored copy with its new version.
    ///
    /// Fails with [`StoreError::Conflict`] when the record's version does
    /// not match the stored one.
    fn save(&self, record: Record) -> Result<Record, StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn load(&self, id: Uuid) -> Result<Record, StoreError> {
        (**self).load(id)
    }

    fn save(&self, record: Record) -> Result<Record, StoreError> {
        (**self).save(record)
    }
}

/// In-process store with optimistic locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, id: Uuid) -> Result<Record, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn save(&self, mut record: Record) -> Result<Record, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let stored_version = records.get(&record.id()).map_or(0, Record::version);
        if stored_version != record.version() {
            return Err(StoreError::Conflict {
                id: record.id(),
                expected: record.version(),
                found: stored_version,
            });
        }

        record.set_version(stored_version + 1);
        records.insert(record.id(), record.clone());
        Ok(record)
    }
}
