//! # hide-store
//!
//! Persistence for finalized measurements and the learning reference.
//!
//! - [`MeasurementStore`]: the injected storage boundary
//! - [`FileStore`]: `history.jsonl` + `learning.json` in a data directory
//! - [`MemoryStore`]: in-process store for tests and dry runs
//! - [`MeasurementLog`]: newest-first history with save/list/get/delete/clear
//! - [`learning`]: capture, retrieve, and clear the learning reference
//!
//! Storage failures never take the history down: reads skip unreadable
//! records, and write failures come back as warnings.

pub mod error;
pub mod history;
pub mod learning;
pub mod store;

pub use error::StoreError;
pub use history::{MeasurementLog, SaveReport};
pub use learning::Capture;
pub use store::{FileStore, MeasurementStore, MemoryStore};
