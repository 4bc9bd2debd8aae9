//! Static build pipeline for Waymark sites.
//!
//! Turns a directory of markdown pages plus a `nav.md` into the deployable
//! site the router consumes:
//!
//! - [`PageRenderer`]: markdown to HTML document fragments
//! - [`compose_nav`]: markdown bullet list to the sidebar markup
//! - [`inject_toc`]: heading ids and build-time TOC per fragment
//! - [`write_sitemap`]: `sitemap.xml` over the composed navigation
//! - [`lint_fragment`]: content checks that guard the pipeline's invariants
//! - [`Pipeline`]: runs the above over a source directory

mod compose;
mod lint;
mod markdown;
mod pipeline;
mod sitemap;
mod toc_inject;

use std::path::PathBuf;

pub use compose::compose_nav;
pub use lint::{LintIssue, LintSeverity, lint_fragment};
pub use markdown::{PageRenderer, RenderResult};
pub use pipeline::{BuildSummary, Pipeline};
pub use sitemap::write_sitemap;
pub use toc_inject::inject_toc;

/// Build pipeline error.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// I/O failure with the path involved.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The navigation source has no list to compose from.
    #[error("no list found in navigation source")]
    EmptyNav,
    /// Sitemap serialization failure.
    #[error("sitemap write failed: {0}")]
    Sitemap(#[from] std::io::Error),
}

impl BuildError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
