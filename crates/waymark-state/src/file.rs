//! JSON-file session store.
//!
//! [`FileSession`] keeps the whole session in one JSON object on disk,
//! loaded on open and rewritten on every mutation. A session that spans a
//! process restart (the desktop preview, tests against a real directory)
//! gets the same continuity the in-memory store gives a single run.
//!
//! I/O failures are logged and degrade to an empty session rather than
//! failing the caller; the store contract has no error channel.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::SessionStore;

/// [`SessionStore`] backed by a single JSON file.
pub struct FileSession {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSession {
    /// Open the session at `path`, loading any existing entries.
    ///
    /// A missing file starts an empty session; an unreadable or malformed
    /// file is logged and treated the same way.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path);
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn write_through(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "session dir create failed");
            return;
        }
        match serde_json::to_string_pretty(entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "session write failed");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "session serialize failed");
            }
        }
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    let Ok(raw) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed session file, starting empty");
            HashMap::new()
        }
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.write_through(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.write_through(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_session_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSession::open(path.clone());
        store.set("currentPage", "guide");
        drop(store);

        let store = FileSession::open(path);
        assert_eq!(store.get("currentPage").as_deref(), Some("guide"));
    }

    #[test]
    fn test_file_session_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSession::open(path.clone());
        store.set("sidebarCollapsed", "true");
        store.remove("sidebarCollapsed");
        drop(store);

        let store = FileSession::open(path);
        assert_eq!(store.get("sidebarCollapsed"), None);
    }

    #[test]
    fn test_file_session_malformed_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSession::open(path);
        assert_eq!(store.get("currentPage"), None);
    }

    #[test]
    fn test_file_session_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/session.json");

        let store = FileSession::open(path.clone());
        store.set("currentPage", "guide");

        assert!(path.exists());
    }
}
