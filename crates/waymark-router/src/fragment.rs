//! Address-bar fragment format.
//!
//! `#key` addresses a page; `#key:anchorId` addresses a page plus an
//! in-page anchor. The colon is the sole separator and cannot appear
//! inside a content key, so the first colon always splits correctly.

use std::fmt;

/// A parsed address fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Content key of the addressed page.
    pub key: String,
    /// Optional in-page anchor to scroll to once the page is active.
    pub anchor: Option<String>,
}

impl Fragment {
    /// Parse a fragment string, with or without the leading `#`.
    ///
    /// Returns `None` for an empty fragment or an empty key part.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        if raw.is_empty() {
            return None;
        }
        let (key, anchor) = match raw.split_once(':') {
            Some((key, anchor)) => (key, (!anchor.is_empty()).then(|| anchor.to_owned())),
            None => (raw, None),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_owned(),
            anchor,
        })
    }

    #[must_use]
    pub fn page(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            anchor: None,
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}:{anchor}", self.key),
            None => write!(f, "{}", self.key),
        }
    }
}
