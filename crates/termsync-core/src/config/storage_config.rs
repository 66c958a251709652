//! SQLite backend configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// `PRAGMA busy_timeout` in milliseconds.
    pub busy_timeout_ms: u32,
    /// Rows per INSERT statement inside one bulk transaction.
    pub insert_chunk_rows: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
            insert_chunk_rows: 500,
        }
    }
}

impl StorageConfig {
    pub fn effective_insert_chunk_rows(&self) -> usize {
        self.insert_chunk_rows.max(1)
    }
}
