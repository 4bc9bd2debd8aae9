//! Session-scoped UI state for Waymark.
//!
//! The router and TOC remember what the reader had open: the current page,
//! which sidebar menus are expanded, which TOC sections and headings are
//! collapsed. This crate provides the storage seam and a typed schema on
//! top of it:
//!
//! - [`SessionStore`]: string key-value store, the storage seam
//! - [`MemorySession`]: in-process implementation, lives for one session
//! - [`FileSession`]: JSON-file implementation that survives a restart
//! - [`SessionState`]: typed accessors over the raw key-value entries
//!
//! # Example
//!
//! ```
//! use waymark_state::{MemorySession, SessionState};
//!
//! let state = SessionState::new(Box::new(MemorySession::new()));
//! state.set_current_page("guide");
//! assert_eq!(state.current_page().as_deref(), Some("guide"));
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

mod file;
mod schema;

pub use file::FileSession;
pub use schema::SessionState;

/// String key-value store scoped to one reading session.
///
/// Entries are created lazily on first write, never expire within the
/// session, and last-write-wins. Storage failures are not surfaced to
/// callers; an implementation logs and degrades to an empty read.
pub trait SessionStore: Send + Sync {
    /// Retrieve the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove the entry under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-process [`SessionStore`]. State lives until the value is dropped.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
