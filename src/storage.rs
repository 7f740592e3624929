//! Durable storage for the task collection.
//!
//! The board persists as one JSON blob — the serialized task collection —
//! at a well-known path. It is read once at process start to seed the
//! repository and rewritten in full after every successful mutation.
//! A malformed or missing blob loads as an empty collection rather than
//! failing startup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::Task;

/// File name of the board blob inside the data directory
pub const BOARD_FILE: &str = "board.json";

/// Storage manager for the board blob
#[derive(Debug, Clone)]
pub struct BoardStorage {
    data_file: PathBuf,
}

impl BoardStorage {
    /// Storage rooted at a data directory; the blob lives at
    /// `<dir>/board.json`.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        BoardStorage {
            data_file: dir.as_ref().join(BOARD_FILE),
        }
    }

    /// Storage at an explicit blob path.
    pub fn at(data_file: PathBuf) -> Self {
        BoardStorage { data_file }
    }

    /// Platform data directory for the current user, falling back to the
    /// working directory when the platform offers none.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "timeboard")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn lock_path(&self) -> PathBuf {
        self.data_file.with_extension("lock")
    }

    /// Load the persisted task collection. Missing or unparseable state is
    /// "no prior state": an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.data_file.exists() {
            debug!(path = %self.data_file.display(), "no board file, starting empty");
            return Ok(Vec::new());
        }

        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        let contents = fs::read_to_string(&self.data_file)?;
        match serde_json::from_str(&contents) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                warn!(
                    path = %self.data_file.display(),
                    error = %err,
                    "board file is malformed, starting empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Write the full task collection atomically.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        let json = serde_json::to_string_pretty(tasks)?;
        lock::write_atomic(&self.data_file, json.as_bytes())?;
        debug!(
            path = %self.data_file.display(),
            tasks = tasks.len(),
            "board persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskDraft, TaskStatus};
    use chrono::Utc;
    use tempfile::TempDir;

    fn task(name: &str) -> Task {
        Task::create(
            TaskDraft {
                name: name.to_string(),
                description: "description".to_string(),
                assigned_to: "alex.kit@example.com".to_string(),
                estimated_time: 1200,
                url_link: None,
            },
            "admin@example.com",
            Utc::now(),
        )
        .expect("create")
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let storage = BoardStorage::for_dir(temp.path());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let storage = BoardStorage::for_dir(temp.path());

        let tasks = vec![task("one"), task("two")];
        storage.save(&tasks).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, tasks);
        assert_eq!(loaded[0].status, TaskStatus::New);
    }

    #[test]
    fn malformed_blob_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let storage = BoardStorage::for_dir(temp.path());
        fs::write(storage.data_file(), "{not json").unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let temp = TempDir::new().unwrap();
        let storage = BoardStorage::for_dir(temp.path());

        storage.save(&[task("one"), task("two")]).unwrap();
        storage.save(&[task("survivor")]).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "survivor");
    }
}
