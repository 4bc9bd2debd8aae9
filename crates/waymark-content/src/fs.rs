//! Filesystem-backed content source.

use std::path::{Path, PathBuf};

use crate::error::ContentError;
use crate::source::ContentSource;

/// Content source resolving `content/{key}.html` under a site root.
///
/// Keys are validated before touching the filesystem: a key containing `:`
/// (the fragment separator), `..` segments, or a leading separator is
/// rejected as [`ContentErrorKind::InvalidKey`](crate::ContentErrorKind::InvalidKey).
pub struct FsContent {
    root: PathBuf,
}

impl FsContent {
    /// Create a content source rooted at the built site directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, ContentError> {
        validate_key(key)?;
        Ok(self.root.join("content").join(format!("{key}.html")))
    }
}

/// Reject keys that could escape the content directory or collide with the
/// fragment format.
fn validate_key(key: &str) -> Result<(), ContentError> {
    let malformed = key.is_empty()
        || key.contains(':')
        || key.starts_with('/')
        || key.starts_with('\\')
        || Path::new(key)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

    if malformed {
        return Err(ContentError::invalid_key(key).with_backend("Fs"));
    }
    Ok(())
}

impl ContentSource for FsContent {
    fn fetch(&self, key: &str) -> Result<String, ContentError> {
        let path = self.resolve(key)?;
        tracing::debug!(key, path = %path.display(), "fetching content");
        std::fs::read_to_string(&path)
            .map_err(|e| ContentError::io(e, Some(key.to_owned())).with_backend("Fs"))
    }

    fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_ok_and(|path| path.is_file())
    }
}
