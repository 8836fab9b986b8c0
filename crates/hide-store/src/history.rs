//! Measurement history service.

use chrono::Utc;
use hide_core::ids::{PREFIX_MEASUREMENT, generate_id};
use hide_core::{LearningReference, MeasurementRecord, MeasurementResult};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::learning::{self, Capture};
use crate::store::MeasurementStore;

/// Outcome of saving a measurement.
///
/// The record is always added to the in-memory history. Storage problems are
/// collected as warnings rather than failing the save.
#[derive(Debug)]
pub struct SaveReport {
    pub record: MeasurementRecord,
    pub learning: Option<Capture>,
    pub warnings: Vec<StoreError>,
}

impl SaveReport {
    #[must_use]
    pub fn persisted(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Newest-first history over an injected store.
#[derive(Debug)]
pub struct MeasurementLog<S: MeasurementStore> {
    store: S,
    records: Vec<MeasurementRecord>,
}

impl<S: MeasurementStore> MeasurementLog<S> {
    /// Load the history from `store`.
    ///
    /// Unreadable storage starts an empty history with a warning.
    pub fn open(store: S) -> Self {
        let records = store.load_history().unwrap_or_else(|error| {
            warn!(%error, "history unavailable; starting empty");
            Vec::new()
        });
        Self { store, records }
    }

    /// Finalize `result` into a record at the front of the history.
    ///
    /// Manual or edited results with a thumbnail also refresh the learning
    /// reference when the trace is detailed enough.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] only if a record ID cannot be generated.
    pub fn save(
        &mut self,
        result: MeasurementResult,
        image_name: Option<String>,
        thumbnail: Option<&str>,
    ) -> Result<SaveReport, StoreError> {
        let record = MeasurementRecord {
            id: generate_id(PREFIX_MEASUREMENT)?,
            created_at: Utc::now(),
            image_name,
            result,
        };
        let mut warnings = Vec::new();

        if let Err(error) = self.store.append_record(&record) {
            warn!(%error, id = %record.id, "measurement kept in memory only");
            warnings.push(error);
        }
        self.records.insert(0, record.clone());

        let learning = match thumbnail {
            Some(thumbnail) if record.result.manual || record.result.edited => {
                match learning::capture(&mut self.store, thumbnail, &record.result.target) {
                    Ok(capture) => Some(capture),
                    Err(error) => {
                        warn!(%error, "learning reference not saved");
                        warnings.push(error);
                        None
                    }
                }
            }
            _ => None,
        };

        debug!(id = %record.id, method = %record.result.method(), "measurement saved");
        Ok(SaveReport {
            record,
            learning,
            warnings,
        })
    }

    /// All records, newest first.
    #[must_use]
    pub fn list(&self) -> &[MeasurementRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MeasurementRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove one record.
    ///
    /// The in-memory history is updated even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown ID, or the storage error.
    pub fn delete(&mut self, id: &str) -> Result<MeasurementRecord, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.records.remove(index);
        self.store.replace_history(&self.records)?;
        debug!(id, "measurement deleted");
        Ok(removed)
    }

    /// Remove every record and the learning reference.
    ///
    /// # Errors
    ///
    /// Returns the first storage error. The in-memory history is cleared regardless.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let count = self.records.len();
        self.records.clear();
        let history = self.store.replace_history(&[]);
        let learning = learning::clear(&mut self.store);
        debug!(count, "history cleared");
        history.and(learning).map(|()| count)
    }

    /// The stored learning reference, if any.
    #[must_use]
    pub fn learning_reference(&self) -> Option<LearningReference> {
        learning::retrieve(&self.store)
    }

    /// Drop the learning reference without touching history.
    ///
    /// # Errors
    ///
    /// Returns the storage error.
    pub fn clear_learning(&mut self) -> Result<(), StoreError> {
        learning::clear(&mut self.store)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
