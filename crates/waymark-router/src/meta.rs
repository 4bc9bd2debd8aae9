//! Page metadata synchronization.
//!
//! After a page body is installed, the document title, meta description
//! and canonical address are rederived from the content so crawlers and
//! the tab bar track the active page.

use serde::Serialize;
use waymark_toc::PageScan;

/// Description length cap, matching what search engines display.
const DESCRIPTION_MAX_CHARS: usize = 160;

/// Site-wide facts the router needs for metadata.
#[derive(Clone, Debug)]
pub struct SiteInfo {
    /// Site title, appended to page titles.
    pub title: String,
    /// Canonical base URL, fragment-addressed per page.
    pub base_url: String,
}

/// Metadata derived for one activated page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Document title, `{page} - {site}` when the page has an H1.
    pub title: String,
    /// Meta description from the first paragraph, capped at 160 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical address, `{base_url}#{key}`.
    pub canonical: String,
}

impl PageMeta {
    /// Derive metadata from a page scan.
    #[must_use]
    pub fn derive(scan: &PageScan, key: &str, site: &SiteInfo) -> Self {
        let title = match &scan.first_h1_text {
            Some(h1) if !h1.is_empty() => format!("{h1} - {}", site.title),
            _ => site.title.clone(),
        };
        let description = scan
            .first_paragraph
            .as_deref()
            .map(|text| truncate_chars(text, DESCRIPTION_MAX_CHARS));
        Self {
            title,
            description,
            canonical: format!("{}#{key}", site.base_url),
        }
    }
}

/// Cut `text` to at most `max` characters, on a character boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use waymark_toc::scan_page;

    use super::*;

    fn site() -> SiteInfo {
        SiteInfo {
            title: "Waymark Docs".to_owned(),
            base_url: "https://docs.example.com/".to_owned(),
        }
    }

    #[test]
    fn test_title_from_first_h1() {
        let scan = scan_page("<h1>Guide</h1><p>Intro.</p>");

        let meta = PageMeta::derive(&scan, "guide", &site());

        assert_eq!(meta.title, "Guide - Waymark Docs");
        assert_eq!(meta.description.as_deref(), Some("Intro."));
        assert_eq!(meta.canonical, "https://docs.example.com/#guide");
    }

    #[test]
    fn test_title_falls_back_to_site_title() {
        let scan = scan_page("<p>No heading here.</p>");

        let meta = PageMeta::derive(&scan, "guide", &site());

        assert_eq!(meta.title, "Waymark Docs");
    }

    #[test]
    fn test_description_truncated_on_char_boundary() {
        let long = "é".repeat(200);
        let scan = scan_page(&format!("<p>{long}</p>"));

        let meta = PageMeta::derive(&scan, "guide", &site());

        let description = meta.description.unwrap();
        assert_eq!(description.chars().count(), 160);
        assert_eq!(description, "é".repeat(160));
    }

    #[test]
    fn test_description_absent_without_paragraph() {
        let scan = scan_page("<h1>Guide</h1>");

        let meta = PageMeta::derive(&scan, "guide", &site());

        assert_eq!(meta.description, None);
    }
}
