//! Cross-cutting error types for hidemeter.
//!
//! Domain-specific errors (e.g., `StoreError`, `DetectError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any hidemeter crate.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A coordinate was NaN, infinite, or outside the logical grid.
    #[error("Coordinate out of range: ({x}, {y}) is not inside [0, 1000] x [0, 1000]")]
    OutOfRange { x: f64, y: f64 },

    /// An outline path string could not be parsed.
    #[error("Invalid outline at token {position}: {reason}")]
    InvalidOutline { position: usize, reason: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
