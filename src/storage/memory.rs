//! In-memory weight log
//!
//! Session-only history; lost when the process exits.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::WeightLogEntry;
use crate::storage::WeightLog;
use std::sync::RwLock;

/// Weight log held in a vector
#[derive(Debug, Default)]
pub struct MemoryWeightLog {
    entries: RwLock<Vec<WeightLogEntry>>,
}

impl MemoryWeightLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeightLog for MemoryWeightLog {
    fn append(&self, entry: WeightLogEntry) -> StorageResult<()> {
        entry.validate()?;
        self.entries
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?
            .push(entry);
        Ok(())
    }

    fn read_all(&self) -> StorageResult<Vec<WeightLogEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(entries.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
