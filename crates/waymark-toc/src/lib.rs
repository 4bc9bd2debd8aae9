//! Two-source table of contents for waymark.
//!
//! A page's TOC combines two sources:
//! - **Headings**: H2/H3/H4 elements scanned from the fetched page body,
//!   nested by level and given stable anchor ids
//! - **Sub-pages**: the page's siblings and descendants from the navigation
//!   tree
//!
//! The headings section always renders before the navigation section; the
//! navigation section defaults to collapsed whenever headings are present.
//! Pages pre-rendered with a build-time TOC keep it; only a missing
//! navigation section is spliced in at view time.
//!
//! All operations are pure functions over a scanned body
//! ([`scan_page`]), so TOC construction is testable without a rendering
//! environment.

mod render;
mod scan;
mod slug;
mod toc;

pub use render::{TocDisplay, render_nav_section, render_toc, splice_into_body};
pub use scan::{PageScan, ScannedHeading, scan_page};
pub use slug::slugify;
pub use toc::{HeadingItem, HeadingLevel, SubpageEntry, Toc, build_toc, heading_items};

/// Escape text for inclusion in HTML content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
