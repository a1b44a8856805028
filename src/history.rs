//! Persistent history of base directories used for backups.
//!
//! Backed by a single JSON file holding an array of path strings, kept
//! sorted and deduplicated. Absence of the file is a valid empty state. The
//! read-modify-write in [`DirectoryHistoryStore::record`] is not protected
//! against concurrent writers; this is a single-user client.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Persistent, deduplicated, lexicographically sorted set of base paths.
#[derive(Debug, Clone)]
pub struct DirectoryHistoryStore {
    path: PathBuf,
}

impl DirectoryHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default history location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("icevault").join("directory_history.json"))
    }

    /// Insert `path` into the persisted set if absent. Idempotent: recording
    /// a path that is already present leaves the file untouched.
    pub fn record(&self, path: &str) -> Result<()> {
        let mut entries = self.load();
        if entries.iter().any(|existing| existing == path) {
            return Ok(());
        }
        entries.push(path.to_string());
        entries.sort();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let encoded = serde_json::to_string(&entries)?;
        fs::write(&self.path, encoded)
            .with_context(|| format!("Failed to write history to {}", self.path.display()))
    }

    /// The persisted set, sorted ascending. Never fails: a missing or
    /// unreadable file yields an empty list.
    pub fn list(&self) -> Vec<String> {
        self.load()
    }

    /// Delete all persisted history.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring corrupt history file");
                Vec::new()
            }
        }
    }
}

impl Default for DirectoryHistoryStore {
    fn default() -> Self {
        let path = Self::default_path()
            .unwrap_or_else(|| Path::new("icevault_directory_history.json").to_path_buf());
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> DirectoryHistoryStore {
        DirectoryHistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn test_list_is_empty_before_anything_is_recorded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_record_persists_sorted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record("/home/user/photos").unwrap();
        store.record("/data").unwrap();
        store.record("/etc/backup").unwrap();

        assert_eq!(store.list(), vec!["/data", "/etc/backup", "/home/user/photos"]);
    }

    #[test]
    fn test_record_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record("/data").unwrap();
        store.record("/data").unwrap();

        assert_eq!(store.list(), vec!["/data"]);
    }

    #[test]
    fn test_round_trip_across_store_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        DirectoryHistoryStore::new(&path).record("/data").unwrap();
        let reopened = DirectoryHistoryStore::new(&path);
        assert_eq!(reopened.list(), vec!["/data"]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record("/data").unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());

        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json at all").unwrap();

        let store = DirectoryHistoryStore::new(&path);
        assert!(store.list().is_empty());

        // Recording over a corrupt file starts a fresh set.
        store.record("/data").unwrap();
        assert_eq!(store.list(), vec!["/data"]);
    }
}
