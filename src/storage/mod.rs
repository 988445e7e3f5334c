//! Fuelplan Weight Log Storage
//!
//! An append-only log of (date, weight) pairs.
//!
//! # Architecture
//!
//! ```text
//! Session ──► Arc<dyn WeightLog>
//!                 ├── CsvWeightLog     (Date,Weight file, mutex-serialized appends)
//!                 └── MemoryWeightLog  (session only)
//! ```
//!
//! Entries are never updated or deleted. Reads return the whole log in
//! insertion order; every display refresh reads it again.

pub mod csv_log;
pub mod error;
pub mod memory;
pub mod types;

pub use csv_log::{export_csv, CsvWeightLog};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryWeightLog;
pub use types::{WeightHistory, WeightLogEntry, WeightTrend};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Append-only store for weigh-ins
pub trait WeightLog: Send + Sync {
    /// Append one entry; implementations serialize concurrent appends
    fn append(&self, entry: WeightLogEntry) -> StorageResult<()>;

    /// Read every entry in insertion order
    fn read_all(&self) -> StorageResult<Vec<WeightLogEntry>>;

    /// Human-readable location, for logs and health output
    fn describe(&self) -> String;
}

/// Which weight log implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Csv,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "file" => Ok(StorageBackend::Csv),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Weight log configuration (`[storage]` table)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    #[serde(default = "default_log_path", deserialize_with = "deserialize_log_path")]
    pub log_path: PathBuf,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Csv
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("fuelplan").join("weight_log.csv"))
        .unwrap_or_else(|| PathBuf::from("./fuelplan_data/weight_log.csv"))
}

fn deserialize_log_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = PathBuf::deserialize(deserializer)?;
    Ok(expand_home(&raw))
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            log_path: default_log_path(),
        }
    }
}

impl StorageConfig {
    /// CSV log at a specific path
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::Csv,
            log_path: expand_home(&log_path.into()),
        }
    }

    /// Session-only log
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Default::default()
        }
    }

    /// Build the configured weight log
    pub fn open(&self) -> StorageResult<Arc<dyn WeightLog>> {
        let log: Arc<dyn WeightLog> = match self.backend {
            StorageBackend::Csv => Arc::new(CsvWeightLog::open(&self.log_path)?),
            StorageBackend::Memory => Arc::new(MemoryWeightLog::new()),
        };
        tracing::info!(log = %log.describe(), "Weight log ready");
        Ok(log)
    }
}
