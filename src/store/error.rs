//! Store and snapshot error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when loading or saving records
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Record {0} not found")]
    NotFound(Uuid),

    /// The stored record changed since it was loaded
    #[error("Record {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict { id: Uuid, expected: u64, found: u64 },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
