//! The append-only record store for removed entries.
//!
//! The store stamps each record with an id and a removal timestamp, prepends
//! it to the front, and caps the total at [`HISTORY_CAP`] records, dropping
//! the oldest beyond the cap. Persistence is a single JSON file; a store
//! without a file path keeps records in memory only.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::proxy::HistorySink;

/// Maximum number of retained records.
pub const HISTORY_CAP: usize = 1000;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error writing history: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One removed entry, most recent first in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanedRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub cleaned_at: DateTime<Utc>,
}

pub struct HistoryStore {
    records: Mutex<Vec<CleanedRecord>>,
    file_path: Option<PathBuf>,
    sequence: AtomicU64,
}

impl HistoryStore {
    /// A store that keeps records in memory only.
    pub fn in_memory() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            file_path: None,
            sequence: AtomicU64::new(0),
        }
    }

    /// A store backed by a JSON file. Existing records are loaded; a missing
    /// or unreadable file starts the store empty rather than failing.
    pub fn with_file(path: PathBuf) -> Self {
        let records = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<CleanedRecord>>(&content) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Failed to parse history file at {:?}: {}", path, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            records: Mutex::new(records),
            file_path: Some(path),
            sequence: AtomicU64::new(0),
        }
    }

    /// Most-recent-first snapshot of the stored records.
    pub fn records(&self) -> Vec<CleanedRecord> {
        self.records.lock().expect("History lock was poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("History lock was poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        let records = {
            let mut records = self.records.lock().expect("History lock was poisoned");
            records.clear();
            records.clone()
        };
        self.persist(&records)
    }

    fn persist(&self, records: &[CleanedRecord]) -> Result<(), HistoryError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }

    fn next_id(&self) -> String {
        // The millisecond stamp alone can collide within a fast batch.
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", Utc::now().timestamp_millis(), seq)
    }
}

impl HistorySink for HistoryStore {
    fn append(&self, title: &str, url: &str) -> Result<(), HistoryError> {
        let record = CleanedRecord {
            id: self.next_id(),
            title: title.to_string(),
            url: url.to_string(),
            cleaned_at: Utc::now(),
        };

        let snapshot = {
            let mut records = self.records.lock().expect("History lock was poisoned");
            records.insert(0, record);
            records.truncate(HISTORY_CAP);
            records.clone()
        };

        self.persist(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_prepend_to_the_front() {
        let store = HistoryStore::in_memory();
        store.append("First", "https://example.com/1").unwrap();
        store.append("Second", "https://example.com/2").unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Second");
        assert_eq!(records[1].title, "First");
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn cap_drops_the_oldest() {
        let store = HistoryStore::in_memory();
        for i in 0..(HISTORY_CAP + 25) {
            store.append(&format!("Entry {}", i), "").unwrap();
        }

        let records = store.records();
        assert_eq!(records.len(), HISTORY_CAP);
        // Most recent first; the earliest 25 appends were dropped.
        assert_eq!(records[0].title, format!("Entry {}", HISTORY_CAP + 24));
        assert_eq!(records[HISTORY_CAP - 1].title, "Entry 25");
    }

    #[test]
    fn file_backed_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let store = HistoryStore::with_file(path.clone());
            store.append("Kept", "https://example.com/kept").unwrap();
        }

        let reloaded = HistoryStore::with_file(path);
        let records = reloaded.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "[{ broken").unwrap();

        let store = HistoryStore::with_file(path);
        assert!(store.is_empty());
    }

    #[test]
    fn clear_empties_the_store() {
        let store = HistoryStore::in_memory();
        store.append("Entry", "").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
