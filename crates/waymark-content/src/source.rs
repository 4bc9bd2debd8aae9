//! The [`ContentSource`] trait.

use crate::error::ContentError;

/// Abstraction over page body retrieval.
///
/// One document exists per content key, addressed as `content/{key}.html`
/// relative to the site root. The body is a document fragment, not a full
/// page. Implementations map keys to their transport (filesystem paths,
/// URLs, embedded assets).
pub trait ContentSource: Send + Sync {
    /// Fetch the document fragment for a content key.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the key is malformed, the document does
    /// not exist, or the backend fails.
    fn fetch(&self, key: &str) -> Result<String, ContentError>;

    /// Check whether a document exists for the key.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, key: &str) -> bool;
}

impl<S: ContentSource + ?Sized> ContentSource for std::sync::Arc<S> {
    fn fetch(&self, key: &str) -> Result<String, ContentError> {
        (**self).fetch(key)
    }

    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }
}

static_assertions::assert_obj_safe!(ContentSource);
