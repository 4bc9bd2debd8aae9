//! Content retrieval abstraction for waymark.
//!
//! This crate provides a [`ContentSource`] trait for fetching page bodies by
//! content key, decoupling the router from the transport that delivers the
//! statically built `content/{key}.html` documents. This enables:
//!
//! - **Unit testing** without a built site on disk
//! - **Backend flexibility** (filesystem, HTTP, embedded assets)
//! - **Clean separation** between navigation logic and I/O
//!
//! # Content keys
//!
//! Every page is addressed by an opaque content key shared with the
//! navigation markup and the session state. Keys never contain `:` (the
//! address-fragment separator) and never resolve outside the site root.

mod error;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use error::{ContentError, ContentErrorKind};
pub use fs::FsContent;
#[cfg(feature = "mock")]
pub use mock::MockContent;
pub use source::ContentSource;
