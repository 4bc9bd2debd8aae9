//! Content retrieval error types.

/// Semantic error categories for content retrieval.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// No document exists for the content key.
    NotFound,
    /// Document exists but cannot be read.
    PermissionDenied,
    /// Key is malformed (contains `:`, path traversal, or is empty).
    InvalidKey,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Content retrieval error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    kind: ContentErrorKind,
    key: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the content key being fetched.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach the backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for a key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(ContentErrorKind::NotFound).with_key(key)
    }

    /// Create an invalid key error.
    #[must_use]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::new(ContentErrorKind::InvalidKey).with_key(key)
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, key: Option<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ContentErrorKind::PermissionDenied,
            _ => ContentErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(k) = key {
            error = error.with_key(k);
        }
        error
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> &ContentErrorKind {
        &self.kind
    }

    /// Content key being fetched, if known.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::PermissionDenied => "Permission denied",
            ContentErrorKind::InvalidKey => "Invalid content key",
            ContentErrorKind::Unavailable => "Unavailable",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ContentError::not_found("guide").with_backend("Fs");
        assert_eq!(err.to_string(), "[Fs] Not found (key: guide)");
    }

    #[test]
    fn test_io_error_maps_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContentError::io(io, Some("guide".to_owned()));
        assert_eq!(*err.kind(), ContentErrorKind::NotFound);
        assert_eq!(err.key(), Some("guide"));
    }

    #[test]
    fn test_io_error_maps_permission_denied() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = ContentError::io(io, None);
        assert_eq!(*err.kind(), ContentErrorKind::PermissionDenied);
    }

    #[test]
    fn test_source_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContentError::io(io, None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
