//! The persistence boundary and its two implementations.
//!
//! History lives in `history.jsonl`, one record per line, oldest first, so a
//! new measurement is a single line append. The learning reference is a
//! single `learning.json` document that is overwritten on every capture.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hide_core::{LearningReference, MeasurementRecord};
use tracing::{debug, warn};

use crate::error::StoreError;

const HISTORY_FILE: &str = "history.jsonl";
const LEARNING_FILE: &str = "learning.json";

/// Injected storage for finalized measurements and the learning reference.
///
/// History is exchanged newest-first. Reads degrade: unreadable records are
/// skipped and a corrupt learning reference reads as absent.
pub trait MeasurementStore {
    /// All readable records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backing storage cannot be read at all.
    fn load_history(&self) -> Result<Vec<MeasurementRecord>, StoreError>;

    /// Persist one new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] or an I/O error.
    fn append_record(&mut self, record: &MeasurementRecord) -> Result<(), StoreError>;

    /// Replace the whole history. `records` is newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] or an I/O error.
    fn replace_history(&mut self, records: &[MeasurementRecord]) -> Result<(), StoreError>;

    /// The stored learning reference, or `None` if absent or unreadable.
    fn load_learning(&self) -> Option<LearningReference>;

    /// Overwrite the learning reference.
    ///
    /// # Errors
    ///
    /// Returns an I/O or encoding error.
    fn save_learning(&mut self, reference: &LearningReference) -> Result<(), StoreError>;

    /// Remove the learning reference. Succeeds if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an I/O error.
    fn clear_learning(&mut self) -> Result<(), StoreError>;
}

/// Bytes a record occupies as one JSONL line.
fn line_len(record: &MeasurementRecord) -> Result<u64, StoreError> {
    let bytes = serde_json::to_vec(record)?;
    Ok(bytes.len() as u64 + 1)
}

fn check_capacity(needed: u64, limit: Option<u64>) -> Result<(), StoreError> {
    match limit {
        Some(limit) if needed > limit => Err(StoreError::CapacityExceeded { needed, limit }),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    capacity: Option<u64>,
}

impl FileStore {
    /// Open a store in `dir`, creating the directory if needed.
    ///
    /// `capacity` bounds the history file size in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, capacity: Option<u64>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, capacity })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    fn learning_path(&self) -> PathBuf {
        self.dir.join(LEARNING_FILE)
    }

    fn history_len(&self) -> Result<u64, StoreError> {
        match fs::metadata(self.history_path()) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

impl MeasurementStore for FileStore {
    fn load_history(&self) -> Result<Vec<MeasurementRecord>, StoreError> {
        let path = self.history_path();
        let lines = match serde_jsonlines::json_lines(&path) {
            Ok(lines) => lines,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<MeasurementRecord> = Vec::new();
        for (index, line) in lines.enumerate() {
            match line {
                Ok(record) => records.push(record),
                Err(error) => warn!(%error, line = index + 1, "skipping unreadable history record"),
            }
        }
        records.reverse();
        debug!(count = records.len(), "history loaded");
        Ok(records)
    }

    fn append_record(&mut self, record: &MeasurementRecord) -> Result<(), StoreError> {
        check_capacity(self.history_len()? + line_len(record)?, self.capacity)?;
        serde_jsonlines::append_json_lines(self.history_path(), [record])?;
        Ok(())
    }

    fn replace_history(&mut self, records: &[MeasurementRecord]) -> Result<(), StoreError> {
        let needed = records.iter().map(line_len).sum::<Result<u64, _>>()?;
        check_capacity(needed, self.capacity)?;

        let tmp = self.dir.join(format!("{HISTORY_FILE}.tmp"));
        serde_jsonlines::write_json_lines(&tmp, records.iter().rev())?;
        fs::rename(&tmp, self.history_path())?;
        Ok(())
    }

    fn load_learning(&self) -> Option<LearningReference> {
        let raw = match fs::read_to_string(self.learning_path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(%error, "learning reference unreadable; treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(reference) => Some(reference),
            Err(error) => {
                warn!(%error, "learning reference corrupt; treating as absent");
                None
            }
        }
    }

    fn save_learning(&mut self, reference: &LearningReference) -> Result<(), StoreError> {
        let json = serde_json::to_string(reference)?;
        fs::write(self.learning_path(), json)?;
        Ok(())
    }

    fn clear_learning(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(self.learning_path()) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store with the same capacity semantics as [`FileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Oldest first, mirroring the file layout.
    records: Vec<MeasurementRecord>,
    learning: Option<LearningReference>,
    capacity: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes beyond `bytes` of encoded history.
    #[must_use]
    pub fn with_capacity(bytes: u64) -> Self {
        Self {
            capacity: Some(bytes),
            ..Self::default()
        }
    }

    fn used(&self) -> Result<u64, StoreError> {
        self.records.iter().map(line_len).sum()
    }
}

impl MeasurementStore for MemoryStore {
    fn load_history(&self) -> Result<Vec<MeasurementRecord>, StoreError> {
        Ok(self.records.iter().rev().cloned().collect())
    }

    fn append_record(&mut self, record: &MeasurementRecord) -> Result<(), StoreError> {
        check_capacity(self.used()? + line_len(record)?, self.capacity)?;
        self.records.push(record.clone());
        Ok(())
    }

    fn replace_history(&mut self, records: &[MeasurementRecord]) -> Result<(), StoreError> {
        let needed = records.iter().map(line_len).sum::<Result<u64, _>>()?;
        check_capacity(needed, self.capacity)?;
        self.records = records.iter().rev().cloned().collect();
        Ok(())
    }

    fn load_learning(&self) -> Option<LearningReference> {
        self.learning.clone()
    }

    fn save_learning(&mut self, reference: &LearningReference) -> Result<(), StoreError> {
        self.learning = Some(reference.clone());
        Ok(())
    }

    fn clear_learning(&mut self) -> Result<(), StoreError> {
        self.learning = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hide_core::MeasurementResult;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str) -> MeasurementRecord {
        MeasurementRecord {
            id: id.into(),
            created_at: Utc::now(),
            image_name: Some(format!("{id}.jpg")),
            result: MeasurementResult::blank_manual(),
        }
    }

    #[test]
    fn memory_store_returns_newest_first() {
        let mut store = MemoryStore::new();
        store.append_record(&record("msr-00000001")).unwrap();
        store.append_record(&record("msr-00000002")).unwrap();
        let ids: Vec<_> = store
            .load_history()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["msr-00000002", "msr-00000001"]);
    }

    #[test]
    fn memory_store_enforces_capacity() {
        let one = line_len(&record("msr-00000001")).unwrap();
        let mut store = MemoryStore::with_capacity(one + one / 2);
        store.append_record(&record("msr-00000001")).unwrap();
        assert!(matches!(
            store.append_record(&record("msr-00000002")),
            Err(StoreError::CapacityExceeded { .. })
        ));
        assert_eq!(store.load_history().unwrap().len(), 1);
    }

    #[test]
    fn capacity_check_boundaries() {
        assert!(check_capacity(10, None).is_ok());
        assert!(check_capacity(10, Some(10)).is_ok());
        assert!(matches!(
            check_capacity(11, Some(10)),
            Err(StoreError::CapacityExceeded { needed: 11, limit: 10 })
        ));
    }
}
