//! Weight log data types
//!
//! `WeightLogEntry` is the only persisted record. `WeightTrend` and
//! `WeightHistory` are read-side views built from a full log read.

use crate::storage::error::{StorageError, StorageResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (date, weight) row in the log
///
/// Field names match the `Date,Weight` CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLogEntry {
    /// Calendar day of the weigh-in
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Body weight in kilograms
    #[serde(rename = "Weight")]
    pub weight_kg: f64,
}

impl WeightLogEntry {
    /// Create a validated entry
    pub fn new(date: NaiveDate, weight_kg: f64) -> StorageResult<Self> {
        let entry = Self { date, weight_kg };
        entry.validate()?;
        Ok(entry)
    }

    /// Reject weights that are not positive finite numbers
    pub fn validate(&self) -> StorageResult<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(StorageError::InvalidEntry(format!(
                "weight must be a positive number, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }
}

/// Summary of a weight history, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    pub entries: usize,
    pub first_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub first_kg: f64,
    pub latest_kg: f64,
    /// latest - first
    pub change_kg: f64,
    pub min_kg: f64,
    pub max_kg: f64,
}

impl WeightTrend {
    /// Summarize entries, `None` when there is nothing to summarize
    pub fn from_entries(entries: &[WeightLogEntry]) -> Option<Self> {
        let first = entries.first()?;
        let latest = entries.last()?;

        let min_kg = entries
            .iter()
            .map(|e| e.weight_kg)
            .fold(f64::INFINITY, f64::min);
        let max_kg = entries
            .iter()
            .map(|e| e.weight_kg)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            entries: entries.len(),
            first_date: first.date,
            latest_date: latest.date,
            first_kg: first.weight_kg,
            latest_kg: latest.weight_kg,
            change_kg: latest.weight_kg - first.weight_kg,
            min_kg,
            max_kg,
        })
    }
}

/// What a display refresh sees: the full log, or the reason it is missing
#[derive(Debug, Clone, PartialEq)]
pub enum WeightHistory {
    Available(Vec<WeightLogEntry>),
    Unavailable { reason: String },
}

impl WeightHistory {
    pub fn is_available(&self) -> bool {
        matches!(self, WeightHistory::Available(_))
    }

    /// Entries in insertion order; empty when the log is unavailable
    pub fn entries(&self) -> &[WeightLogEntry] {
        match self {
            WeightHistory::Available(entries) => entries,
            WeightHistory::Unavailable { .. } => &[],
        }
    }

    pub fn trend(&self) -> Option<WeightTrend> {
        WeightTrend::from_entries(self.entries())
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            WeightHistory::Available(_) => None,
            WeightHistory::Unavailable { reason } => Some(reason),
        }
    }
}
