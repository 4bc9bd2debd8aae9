//! Mock content source for testing.
//!
//! Provides [`MockContent`] for unit testing without a built site on disk.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ContentError, ContentErrorKind};
use crate::source::ContentSource;

/// In-memory content source for testing.
///
/// Use the builder methods to configure pages and failures. Every `fetch`
/// is counted so callers can assert on retrieval behavior.
///
/// # Example
///
/// ```
/// use waymark_content::{ContentSource, MockContent};
///
/// let source = MockContent::new().with_page("guide", "<h1>Guide</h1>");
/// assert!(source.exists("guide"));
/// assert_eq!(source.fetch_count(), 0);
/// source.fetch("guide").unwrap();
/// assert_eq!(source.fetch_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockContent {
    pages: RwLock<HashMap<String, String>>,
    failing: RwLock<HashMap<String, ContentErrorKind>>,
    fetches: AtomicUsize,
}

impl MockContent {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page body for a key.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, key: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(key.into(), body.into());
        self
    }

    /// Make fetches for a key fail with the given error kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_error(self, key: impl Into<String>, kind: ContentErrorKind) -> Self {
        self.failing.write().unwrap().insert(key.into(), kind);
        self
    }

    /// Number of `fetch` calls made so far (successful or not).
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for MockContent {
    fn fetch(&self, key: &str) -> Result<String, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = self.failing.read().unwrap().get(key) {
            return Err(ContentError::new(kind.clone())
                .with_key(key)
                .with_backend("Mock"));
        }

        self.pages
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ContentError::not_found(key).with_backend("Mock"))
    }

    fn exists(&self, key: &str) -> bool {
        self.pages.read().unwrap().contains_key(key)
    }
}
