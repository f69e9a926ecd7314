//! Persistent extraction session.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SessionError;
use crate::table::RecordTable;

/// Application state for one operator session.
///
/// Owns the record table and carries it across invocations: loaded from
/// disk when the session starts, saved when work is done, emptied only
/// by an explicit clear. Nothing lives in globals; callers create a
/// session and pass it to the operations that need one.
pub struct Session {
    path: PathBuf,
    table: RecordTable,
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    records: RecordTable,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Load the session backed by `path`, starting with an empty table
    /// when no file exists yet. An unreadable file is fatal, like a
    /// corrupt pattern store: accumulated records are never silently
    /// discarded.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                table: RecordTable::new(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let file: SessionFile =
            serde_json::from_str(&contents).map_err(|err| SessionError::Corrupt {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        debug!(
            "loaded {} session records from {}",
            file.records.len(),
            path.display()
        );
        Ok(Self {
            path,
            table: file.records,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut RecordTable {
        &mut self.table
    }

    /// Persist the current table with a fresh timestamp.
    pub fn save(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = SessionFile {
            records: self.table.clone(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        debug!("saved {} session records", self.table.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Record;

    fn session_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("records.json")
    }

    fn sample_record() -> Record {
        let mut record = Record::new("invoice.png");
        record.insert("date", "01.01.2023");
        record
    }

    #[test]
    fn test_load_absent_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(session_path(&dir)).unwrap();
        assert!(session.table().is_empty());
        // Nothing is written until save.
        assert!(!session.path().exists());
    }

    #[test]
    fn test_records_survive_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::load(session_path(&dir)).unwrap();
        session.table_mut().append(sample_record());
        session.save().unwrap();

        let reloaded = Session::load(session_path(&dir)).unwrap();
        assert_eq!(reloaded.table().len(), 1);
        assert_eq!(reloaded.table().snapshot()[0].get("date"), Some("01.01.2023"));
    }

    #[test]
    fn test_clear_then_save_empties_the_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::load(session_path(&dir)).unwrap();
        session.table_mut().append(sample_record());
        session.save().unwrap();

        session.table_mut().clear();
        session.save().unwrap();

        let reloaded = Session::load(session_path(&dir)).unwrap();
        assert!(reloaded.table().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            Session::load(&path),
            Err(SessionError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_saved_file_carries_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(session_path(&dir)).unwrap();
        session.save().unwrap();

        let raw = fs::read_to_string(session.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc["records"].is_array());
        assert!(doc["updated_at"].is_string());
    }
}
