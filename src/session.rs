//! Dashboard Session
//!
//! Explicitly owned per-athlete state: the weight log handle and the water
//! counter. Starts with whatever the log already holds and zero glasses.

use crate::nutrition::{ActivityLevel, AthleteProfile, Goal, NutritionCalculator, TargetBreakdown};
use crate::storage::{
    MemoryWeightLog, StorageResult, WeightHistory, WeightLog, WeightLogEntry,
};
use chrono::NaiveDate;
use std::sync::Arc;

/// State carried between dashboard refreshes
pub struct Session {
    log: Arc<dyn WeightLog>,
    water_glasses: u32,
}

impl Session {
    /// Create a session over an existing log
    pub fn new(log: Arc<dyn WeightLog>) -> Self {
        Self {
            log,
            water_glasses: 0,
        }
    }

    /// Session backed by an empty in-memory log
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryWeightLog::new()))
    }

    /// The underlying log
    pub fn log(&self) -> &Arc<dyn WeightLog> {
        &self.log
    }

    /// Compute targets; independent of log availability
    pub fn targets(
        &self,
        calculator: &NutritionCalculator,
        profile: &AthleteProfile,
        activity: ActivityLevel,
        goal: &Goal,
        today: NaiveDate,
    ) -> TargetBreakdown {
        calculator.calculate(profile, activity, goal, today)
    }

    /// Append a weigh-in
    pub fn record_weight(&self, date: NaiveDate, weight_kg: f64) -> StorageResult<WeightLogEntry> {
        record_weight(self.log.as_ref(), date, weight_kg)
    }

    /// Full history, or the reason it cannot be shown
    pub fn weight_history(&self) -> WeightHistory {
        load_history(self.log.as_ref())
    }

    /// Add glasses of water, returning the new total
    pub fn add_water(&mut self, glasses: u32) -> u32 {
        self.water_glasses = self.water_glasses.saturating_add(glasses);
        self.water_glasses
    }

    pub fn water_glasses(&self) -> u32 {
        self.water_glasses
    }

    pub fn reset_water(&mut self) {
        self.water_glasses = 0;
    }
}

/// Validate and append a weigh-in to `log`
///
/// Usable without holding the session, so callers can run it on a
/// blocking thread.
pub fn record_weight(
    log: &dyn WeightLog,
    date: NaiveDate,
    weight_kg: f64,
) -> StorageResult<WeightLogEntry> {
    let entry = WeightLogEntry::new(date, weight_kg)?;
    log.append(entry)?;
    tracing::info!(date = %date, weight_kg, "Recorded weight entry");
    Ok(entry)
}

/// Read `log` in full; a read failure becomes [`WeightHistory::Unavailable`]
pub fn load_history(log: &dyn WeightLog) -> WeightHistory {
    match log.read_all() {
        Ok(entries) => WeightHistory::Available(entries),
        Err(e) => {
            tracing::warn!(log = %log.describe(), error = %e, "Weight log unavailable");
            WeightHistory::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Sex;
    use crate::storage::{CsvWeightLog, StorageError};
    use tempfile::tempdir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    /// Log whose backing store is gone
    struct BrokenLog;

    impl WeightLog for BrokenLog {
        fn append(&self, _entry: WeightLogEntry) -> StorageResult<()> {
            Err(StorageError::LogUnavailable {
                path: "/missing/weight_log.csv".into(),
                reason: "device not ready".to_string(),
            })
        }

        fn read_all(&self) -> StorageResult<Vec<WeightLogEntry>> {
            Err(StorageError::LogUnavailable {
                path: "/missing/weight_log.csv".into(),
                reason: "device not ready".to_string(),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_initial_state() {
        let session = Session::in_memory();
        assert_eq!(session.water_glasses(), 0);
        assert_eq!(session.weight_history(), WeightHistory::Available(Vec::new()));
    }

    #[test]
    fn test_water_counter() {
        let mut session = Session::in_memory();
        assert_eq!(session.add_water(1), 1);
        assert_eq!(session.add_water(3), 4);
        assert_eq!(session.add_water(u32::MAX), u32::MAX);
        session.reset_water();
        assert_eq!(session.water_glasses(), 0);
    }

    #[test]
    fn test_record_and_read_history() {
        let session = Session::in_memory();
        session.record_weight(date(1), 81.0).unwrap();
        session.record_weight(date(8), 80.2).unwrap();

        let history = session.weight_history();
        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.trend().unwrap().latest_kg, 80.2);
    }

    #[test]
    fn test_record_rejects_bad_weight() {
        let session = Session::in_memory();
        assert!(session.record_weight(date(1), -80.0).is_err());
        assert!(session.weight_history().entries().is_empty());
    }

    #[test]
    fn test_csv_backed_session_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");

        {
            let session = Session::new(Arc::new(CsvWeightLog::open(&path).unwrap()));
            session.record_weight(date(1), 81.0).unwrap();
        }

        let session = Session::new(Arc::new(CsvWeightLog::open(&path).unwrap()));
        assert_eq!(session.weight_history().entries().len(), 1);
    }

    #[test]
    fn test_unavailable_log_does_not_block_targets() {
        let session = Session::new(Arc::new(BrokenLog));

        let history = session.weight_history();
        assert!(!history.is_available());
        assert!(history.trend().is_none());

        let err = session.record_weight(date(1), 80.0).unwrap_err();
        assert!(err.is_unavailable());

        let profile = AthleteProfile::new(80.0, 180.0, 24, Sex::Male).unwrap();
        let breakdown = session.targets(
            &NutritionCalculator::default(),
            &profile,
            ActivityLevel::Moderate,
            &Goal::FatLoss,
            date(19),
        );
        assert_eq!(breakdown.targets.calories, 2306);
    }
}
