//! The client-held directory inventory.
//!
//! Populated wholesale from each successful `load_directory` response and
//! cleared entirely on failure; the status monitor only ever flips
//! `is_uploading` on individual entries, looked up by name.

use serde::Deserialize;
use std::collections::HashMap;

/// One directory as reported by the server, annotated with client-local
/// liveness. Wire field names follow the server payload; `is_uploading` is
/// never sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "files_count", default)]
    pub file_count: u64,
    #[serde(default)]
    pub ignored_count: u64,
    #[serde(default)]
    pub updated_count: u64,
    #[serde(default)]
    pub pending_count: u64,
    #[serde(default)]
    pub pending_bytes: u64,
    #[serde(skip)]
    pub is_uploading: bool,
}

/// Ordered collection of [`DirectoryEntry`] with an index by name.
///
/// The display order is the server's; the index gives the monitor O(1)
/// lookup during reconciliation.
#[derive(Debug, Default)]
pub struct DirectoryInventory {
    entries: Vec<DirectoryEntry>,
    by_name: HashMap<String, usize>,
}

impl DirectoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole inventory. Stale entries (and their liveness flags)
    /// are discarded, not merged.
    pub fn replace(&mut self, entries: Vec<DirectoryEntry>) {
        self.by_name = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.name.clone(), position))
            .collect();
        self.entries = entries;
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_name.clear();
    }

    pub fn get(&self, name: &str) -> Option<&DirectoryEntry> {
        self.by_name.get(name).map(|&position| &self.entries[position])
    }

    /// Flip `is_uploading` on the entry named `name`. Returns whether the
    /// entry was found; a miss is a no-op — the directory may have left the
    /// inventory since the status report was generated.
    pub fn mark_uploading(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&position) => {
                self.entries[position].is_uploading = true;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            file_count: 0,
            ignored_count: 0,
            updated_count: 0,
            pending_count: 0,
            pending_bytes: 0,
            is_uploading: false,
        }
    }

    #[test]
    fn test_deserialize_server_payload() {
        let parsed: DirectoryEntry = serde_json::from_value(json!({
            "name": "/data/photos",
            "files_count": 12,
            "ignored_count": 1,
            "updated_count": 4,
            "pending_count": 7,
            "pending_bytes": 1024,
        }))
        .unwrap();

        assert_eq!(parsed.name, "/data/photos");
        assert_eq!(parsed.file_count, 12);
        assert_eq!(parsed.pending_bytes, 1024);
        assert!(!parsed.is_uploading);
    }

    #[test]
    fn test_replace_discards_stale_entries() {
        let mut inventory = DirectoryInventory::new();
        inventory.replace(vec![entry("/a"), entry("/b")]);
        inventory.mark_uploading("/a");

        inventory.replace(vec![entry("/c")]);
        assert_eq!(inventory.len(), 1);
        assert!(inventory.get("/a").is_none());
        assert!(inventory.get("/c").is_some());
    }

    #[test]
    fn test_mark_uploading_hit_and_miss() {
        let mut inventory = DirectoryInventory::new();
        inventory.replace(vec![entry("/a"), entry("/b")]);

        assert!(inventory.mark_uploading("/a"));
        assert!(!inventory.mark_uploading("/gone"));

        assert!(inventory.get("/a").unwrap().is_uploading);
        assert!(!inventory.get("/b").unwrap().is_uploading);
    }

    #[test]
    fn test_clear_empties_index_too() {
        let mut inventory = DirectoryInventory::new();
        inventory.replace(vec![entry("/a")]);
        inventory.clear();

        assert!(inventory.is_empty());
        assert!(inventory.get("/a").is_none());
        assert!(!inventory.mark_uploading("/a"));
    }
}
