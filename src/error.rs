use thiserror::Error;

use crate::storage::Slot;

/// Failures raised by a storage medium while reading or replacing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file system rejected the operation.
    #[error("i/o error on slot '{slot}': {source}")]
    Io {
        slot: Slot,
        #[source]
        source: std::io::Error,
    },
    /// The collection could not be encoded as JSON.
    #[error("could not serialize slot '{slot}': {source}")]
    Serialize {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },
    /// Writing the slot would exceed the storage quota.
    #[error("storage quota exceeded writing slot '{slot}' ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { slot: Slot, needed: usize, quota: usize },
}

/// Errors reported by the command layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Input refused before it reached a store.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Reading from or drawing to the terminal failed.
    #[error("terminal i/o: {0}")]
    Terminal(#[from] std::io::Error),
}
