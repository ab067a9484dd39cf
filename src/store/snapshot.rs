//! Serializable snapshots of records.

use super::error::SnapshotError;
use crate::core::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned, serializable copy of a record at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// The record, including its history
    pub record: Record,
}

impl RecordSnapshot {
    /// Take a snapshot of a record.
    pub fn new(record: Record) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            taken_at: Utc::now(),
            record,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Unwrap the record.
    pub fn into_record(self) -> Record {
        self.record
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateMachineBuilder, TransitionBuilder};
    use crate::core::StateMachineDefinition;

    fn definition() -> StateMachineDefinition {
        StateMachineBuilder::new()
            .initial_state("pending")
            .transition(TransitionBuilder::new("confirm").from("pending").to("confirmed"))
            .unwrap()
            .build()
            .unwrap()
    }

    fn confirmed_record() -> Record {
        let mut record = Record::new(&definition()).with_attribute("carrier", "ups");
        record.apply_transition("confirm", "confirmed".into(), false);
        record
    }

    #[test]
    fn json_snapshot_preserves_record() {
        let snapshot = RecordSnapshot::new(confirmed_record());

        let json = snapshot.to_json().unwrap();
        let restored = RecordSnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.into_record().state().as_str(), "confirmed");
    }

    #[test]
    fn binary_snapshot_preserves_record() {
        let snapshot = RecordSnapshot::new(confirmed_record());

        let bytes = snapshot.to_bytes().unwrap();
        let restored = RecordSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored.record, snapshot.record);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut snapshot = RecordSnapshot::new(confirmed_record());
        snapshot.version = SNAPSHOT_VERSION + 1;

        let json = snapshot.to_json().unwrap();
        let result = RecordSnapshot::from_json(&json);

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            RecordSnapshot::from_json("{\"version\": 1}"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}
