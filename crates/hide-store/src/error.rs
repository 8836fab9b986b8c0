//! Storage error types for hide-store.

use hide_core::CoreError;
use thiserror::Error;

/// Errors from history and learning persistence.
///
/// None of these are fatal: callers report them as warnings and keep working
/// with the in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing files failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded.
    #[error("Could not encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing would exceed the configured storage budget.
    #[error("Storage full: {needed} bytes needed, limit is {limit} bytes")]
    CapacityExceeded { needed: u64, limit: u64 },

    /// No record with the given ID.
    #[error("Measurement '{0}' not found")]
    NotFound(String),

    /// Record construction failed (ID generation, validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}
