//! Build-time TOC injection.
//!
//! Pre-renders the headings section of each page's TOC into the fragment
//! and writes anchor ids into the heading tags, so a page is useful before
//! any script runs. The navigation section is left out on purpose; it
//! depends on session state and is spliced in at view time.

use waymark_toc::{Toc, TocDisplay, heading_items, scan_page, splice_into_body};

/// Inject heading anchor ids and a build-time TOC into a fragment.
///
/// A fragment that already carries a TOC, or yields no headings, comes
/// back with ids injected but no new TOC.
#[must_use]
pub fn inject_toc(fragment: &str) -> String {
    let scan = scan_page(fragment);
    let toc = Toc {
        headings: heading_items(&scan),
        subpages: Vec::new(),
    };
    let display = TocDisplay::for_toc(&toc);
    if scan.has_existing_toc {
        tracing::debug!("fragment already carries a TOC, ids only");
    }
    splice_into_body(fragment, &scan, &toc, &display)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_inject_adds_ids_and_toc() {
        let out = inject_toc("<h1>Guide</h1><h2>Setup</h2><h3>Linux</h3>");

        assert!(out.contains(r#"<h2 id="setup">"#));
        assert!(out.contains(r#"<h3 id="linux">"#));
        let toc_at = out.find("<nav class=\"table-of-contents\">").unwrap();
        assert!(toc_at > out.find("</h1>").unwrap());
        assert!(out.contains(r#"data-section="headings""#));
        // Navigation section is a view-time concern
        assert!(!out.contains(r#"data-section="navigation""#));
    }

    #[test]
    fn test_inject_without_headings_is_identity() {
        let body = "<h1>Guide</h1><p>Short page.</p>";

        assert_eq!(inject_toc(body), body);
    }

    #[test]
    fn test_inject_idempotent() {
        let once = inject_toc("<h1>G</h1><h2>Setup</h2>");
        let twice = inject_toc(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_inject_skips_category_labels() {
        let out = inject_toc("<h1>G</h1><h2>Tools:</h2><h2>Setup</h2>");

        assert!(!out.contains("Tools:</a>"));
        assert!(out.contains(r##"href="#setup""##));
        // The label heading itself keeps no anchor id
        assert!(out.contains("<h2>Tools:</h2>"));
    }
}
