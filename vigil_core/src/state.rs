//! Session snapshot persistence with file locking.
//!
//! The engine itself never touches storage; this module is the boundary
//! adapter that saves and restores [`SessionSnapshot`] values with proper
//! file locking to prevent concurrent access issues.

use crate::{Error, Result, SessionSnapshot};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl SessionSnapshot {
    /// Load a snapshot from a file with shared locking.
    ///
    /// Returns `None` if the file doesn't exist. A file that cannot be read
    /// or parsed is treated the same way, with a warning: an unreadable
    /// snapshot should start a fresh session, not abort the program.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No snapshot file at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open snapshot {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock snapshot {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read snapshot {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<SessionSnapshot>(&contents) {
            Ok(snapshot) => {
                tracing::debug!("Loaded session snapshot from {:?}", path);
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!("Failed to parse snapshot {:?}: {}. Ignoring it.", path, e);
                Ok(None)
            }
        }
    }

    /// Save the snapshot to a file with exclusive locking.
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "snapshot path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old snapshot file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved session snapshot to {:?}", path);
        Ok(())
    }

    /// Remove a saved snapshot (e.g., after the session completed).
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::debug!("Cleared session snapshot at {:?}", path);
        }
        Ok(())
    }
}
