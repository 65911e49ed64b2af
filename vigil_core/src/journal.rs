//! Completed-devotion journal.
//!
//! Finished sessions are appended to a JSONL (JSON Lines) file with file
//! locking to ensure safe concurrent access. The journal is history for the
//! user to read back; the engine's transitions never consult it.

use crate::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One finished devotional session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletedDevotion {
    pub id: Uuid,
    pub group_id: String,
    pub items_completed: usize,
    pub completed_on: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}

/// Journal sink trait for recording completed sessions
pub trait JournalSink {
    fn append(&mut self, entry: &CompletedDevotion) -> Result<()>;
}

/// JSONL-based journal sink with file locking
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    /// Create a new JSONL journal for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl JournalSink for JsonlJournal {
    fn append(&mut self, entry: &CompletedDevotion) -> Result<()> {
        self.ensure_parent_dir()?;

        // Open file for appending
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Acquire exclusive lock
        file.lock_exclusive()?;

        // Write entry as JSON line
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended completed devotion {} to journal", entry.id);
        Ok(())
    }
}

/// Read all entries from a journal file
///
/// Corrupt lines are skipped with a warning; the rest of the journal still
/// loads.
pub fn read_entries(path: &Path) -> Result<Vec<CompletedDevotion>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<CompletedDevotion>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse journal entry at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from journal", entries.len());
    Ok(entries)
}

/// Read journal entries completed within the last `days` days, newest first.
pub fn read_recent_entries(path: &Path, days: i64) -> Result<Vec<CompletedDevotion>> {
    let cutoff = Utc::now() - chrono::Duration::days(days);
    let mut entries: Vec<_> = read_entries(path)?
        .into_iter()
        .filter(|e| e.recorded_at >= cutoff)
        .collect();
    entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    Ok(entries)
}
