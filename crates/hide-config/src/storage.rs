//! Local history storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `history.jsonl` and `learning.json`.
    /// Empty uses the platform data directory.
    #[serde(default)]
    pub data_dir: String,

    /// Byte budget for the history file. 0 means unlimited.
    #[serde(default)]
    pub max_history_bytes: u64,
}

impl StorageConfig {
    /// The configured directory, or `<data_dir>/hidemeter` for the platform.
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_empty() {
            dirs::data_dir().map(|p| p.join("hidemeter"))
        } else {
            Some(PathBuf::from(&self.data_dir))
        }
    }

    /// Capacity limit, if any.
    #[must_use]
    pub const fn capacity(&self) -> Option<u64> {
        if self.max_history_bytes == 0 {
            None
        } else {
            Some(self.max_history_bytes)
        }
    }
}
