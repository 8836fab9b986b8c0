//! Learning reference capture and retrieval.
//!
//! Only detailed traces are kept: a capture with 10 points or fewer leaves
//! the stored reference untouched.

use hide_core::learning::is_detailed_enough;
use hide_core::{LearningReference, Polygon};
use tracing::debug;

use crate::error::StoreError;
use crate::store::MeasurementStore;

/// What a capture attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Stored,
    /// The trace had too few points; nothing changed.
    Skipped { points: usize },
}

/// Store `target` with its thumbnail, overwriting any previous reference.
///
/// # Errors
///
/// Returns a [`StoreError`] if the reference cannot be built or written.
pub fn capture<S: MeasurementStore + ?Sized>(
    store: &mut S,
    thumbnail: &str,
    target: &Polygon,
) -> Result<Capture, StoreError> {
    if !is_detailed_enough(target) {
        debug!(points = target.len(), "trace too coarse to learn from");
        return Ok(Capture::Skipped {
            points: target.len(),
        });
    }
    let reference = LearningReference::new(thumbnail, target.clone())?;
    store.save_learning(&reference)?;
    debug!(points = target.len(), "learning reference captured");
    Ok(Capture::Stored)
}

/// The most recent reference, or `None` if absent or unreadable.
pub fn retrieve<S: MeasurementStore + ?Sized>(store: &S) -> Option<LearningReference> {
    store.load_learning()
}

/// Remove the stored reference.
///
/// # Errors
///
/// Returns a [`StoreError`] if the backing storage cannot be updated.
pub fn clear<S: MeasurementStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.clear_learning()
}
