//! Append-only CSV weight log
//!
//! File format:
//!
//! ```text
//! Date,Weight
//! 2026-10-01,82.0
//! 2026-10-08,80.5
//! ```
//!
//! The header is written once, when the file is empty. Each append opens
//! the file in append mode, writes exactly one record, and flushes. Appends
//! are serialized by a mutex so concurrent writers never interleave rows.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::WeightLogEntry;
use crate::storage::WeightLog;
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const HEADER: [&str; 2] = ["Date", "Weight"];

/// Weight log persisted to a flat CSV file
pub struct CsvWeightLog {
    /// Path to the CSV file
    path: PathBuf,
    /// Held for the duration of each append
    write_lock: Mutex<()>,
}

impl CsvWeightLog {
    /// Open a log at `path`, creating parent directories if needed
    ///
    /// The file itself is created lazily on first append.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::LogUnavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        tracing::debug!(path = ?path, "Opened CSV weight log");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    fn unavailable(&self, reason: impl Display) -> StorageError {
        StorageError::LogUnavailable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn read_error(&self, err: csv::Error) -> StorageError {
        if let csv::ErrorKind::Io(_) = err.kind() {
            return self.unavailable(&err);
        }
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        StorageError::Corruption {
            line,
            reason: err.to_string(),
        }
    }
}

impl WeightLog for CsvWeightLog {
    fn append(&self, entry: WeightLogEntry) -> StorageResult<()> {
        entry.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let len = file.metadata().map_err(|e| self.unavailable(e))?.len();
        let needs_header = len == 0;

        // A hand-edited file may lack the final newline
        if len > 0 && !ends_with_newline(&mut file, len).map_err(|e| self.unavailable(e))? {
            file.write_all(b"\n").map_err(|e| self.unavailable(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        writer.serialize(entry)?;
        writer.flush().map_err(|e| self.unavailable(e))?;

        tracing::debug!(
            path = ?self.path,
            date = %entry.date,
            weight_kg = entry.weight_kg,
            "Appended weight entry"
        );

        Ok(())
    }

    fn read_all(&self) -> StorageResult<Vec<WeightLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.read_error(e))?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(StorageError::Corruption {
                line: 1,
                reason: format!(
                    "expected header {:?}, found {:?}",
                    HEADER.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            });
        }

        let mut entries = Vec::new();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record).map_err(|e| self.read_error(e))? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let entry: WeightLogEntry = record
                .deserialize(Some(&headers))
                .map_err(|e| StorageError::Corruption {
                    line,
                    reason: e.to_string(),
                })?;
            entry.validate().map_err(|e| StorageError::Corruption {
                line,
                reason: e.to_string(),
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Render entries as CSV text with the standard header
pub fn export_csv(entries: &[WeightLogEntry]) -> StorageResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StorageError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn entry(day: u32, kg: f64) -> WeightLogEntry {
        WeightLogEntry::new(NaiveDate::from_ymd_opt(2026, 10, day).unwrap(), kg).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempdir().unwrap();
        let log = CsvWeightLog::open(dir.path().join("weight_log.csv")).unwrap();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_values() {
        let dir = tempdir().unwrap();
        let log = CsvWeightLog::open(dir.path().join("nested").join("weight_log.csv")).unwrap();

        let written = vec![
            entry(3, 81.7),
            entry(1, 82.25),
            entry(2, 80.05),
            entry(2, 79.999),
        ];
        for e in &written {
            log.append(*e).unwrap();
        }

        let read = log.read_all().unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        let log = CsvWeightLog::open(&path).unwrap();

        log.append(entry(1, 80.0)).unwrap();
        log.append(entry(2, 79.5)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,Weight\n2026-10-01,80.0\n2026-10-02,79.5\n");
    }

    #[test]
    fn test_reopen_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");

        CsvWeightLog::open(&path).unwrap().append(entry(1, 80.0)).unwrap();
        CsvWeightLog::open(&path).unwrap().append(entry(2, 79.0)).unwrap();

        let read = CsvWeightLog::open(&path).unwrap().read_all().unwrap();
        assert_eq!(read, vec![entry(1, 80.0), entry(2, 79.0)]);
    }

    #[test]
    fn test_invalid_entry_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        let log = CsvWeightLog::open(&path).unwrap();

        let bad = WeightLogEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            weight_kg: -3.0,
        };
        assert!(matches!(log.append(bad), Err(StorageError::InvalidEntry(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_row_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        std::fs::write(&path, "Date,Weight\n2026-10-01,80.0\nnot-a-date,79.0\n").unwrap();

        let log = CsvWeightLog::open(&path).unwrap();
        match log.read_all() {
            Err(StorageError::Corruption { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected corruption, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_row_line_counts_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        std::fs::write(&path, "Date,Weight\n2026-10-01,80.0\n\n\n2026-10-02,-5.0\n").unwrap();

        let log = CsvWeightLog::open(&path).unwrap();
        match log.read_all() {
            Err(StorageError::Corruption { line, .. }) => assert_eq!(line, 5),
            other => panic!("expected corruption, got {:?}", other),
        }
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        std::fs::write(&path, "Date,Weight\n2026-10-01,80.0").unwrap();

        let log = CsvWeightLog::open(&path).unwrap();
        log.append(entry(2, 79.5)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,Weight\n2026-10-01,80.0\n2026-10-02,79.5\n");
        assert_eq!(log.read_all().unwrap(), vec![entry(1, 80.0), entry(2, 79.5)]);
    }

    #[test]
    fn test_wrong_header_is_corruption() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weight_log.csv");
        std::fs::write(&path, "when,kg\n2026-10-01,80.0\n").unwrap();

        let log = CsvWeightLog::open(&path).unwrap();
        assert!(matches!(
            log.read_all(),
            Err(StorageError::Corruption { line: 1, .. })
        ));
    }

    #[test]
    fn test_directory_path_is_unavailable() {
        let dir = tempdir().unwrap();
        let log = CsvWeightLog::open(dir.path()).unwrap();

        let err = log.append(entry(1, 80.0)).unwrap_err();
        assert!(err.is_unavailable());

        let err = log.read_all().unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempdir().unwrap();
        let log = Arc::new(CsvWeightLog::open(dir.path().join("weight_log.csv")).unwrap());

        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append(entry(1 + (i % 28), 60.0 + f64::from(t) + f64::from(i) / 100.0))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.read_all().unwrap().len(), 200);
    }

    #[test]
    fn test_export_csv() {
        let csv = export_csv(&[entry(1, 80.0), entry(2, 79.5)]).unwrap();
        assert_eq!(csv, "Date,Weight\n2026-10-01,80.0\n2026-10-02,79.5\n");

        let empty = export_csv(&[]).unwrap();
        assert_eq!(empty, "Date,Weight\n");
    }
}
