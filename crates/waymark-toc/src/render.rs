//! Markup rendering for the table of contents.
//!
//! The rendered shape matches what the build pipeline embeds in
//! pre-rendered pages, so runtime-built and build-time TOCs are
//! interchangeable: a `nav.table-of-contents` holding one
//! `li.toc-section` per section, tagged `data-section="headings"` or
//! `data-section="navigation"`.

use std::collections::HashSet;

use crate::escape_html;
use crate::scan::PageScan;
use crate::toc::{HeadingItem, SubpageEntry, Toc, anchor_plan};

/// Collapse state applied when rendering a TOC.
#[derive(Clone, Debug, Default)]
pub struct TocDisplay {
    /// Whole TOC collapsed behind the header toggle.
    pub collapsed: bool,
    /// Heading section collapsed.
    pub headings_collapsed: bool,
    /// Navigation section collapsed.
    pub navigation_collapsed: bool,
    /// Individually collapsed headings, by heading text.
    pub collapsed_headings: HashSet<String>,
}

impl TocDisplay {
    /// Defaults for a freshly built TOC with no persisted state.
    #[must_use]
    pub fn for_toc(toc: &Toc) -> Self {
        Self {
            navigation_collapsed: toc.nav_collapsed_default(),
            ..Self::default()
        }
    }
}

fn push_heading_items(out: &mut String, items: &[HeadingItem], display: &TocDisplay) {
    for item in items {
        let mut classes = String::new();
        if !item.children.is_empty() {
            classes.push_str(" class=\"collapsible");
            if display.collapsed_headings.contains(&item.text) {
                classes.push_str(" collapsed");
            }
            classes.push('"');
        }
        out.push_str(&format!(
            "<li{classes}><a href=\"#{}\">{}</a>",
            escape_html(&item.anchor),
            escape_html(&item.text),
        ));
        if !item.children.is_empty() {
            out.push_str("<ul>");
            push_heading_items(out, &item.children, display);
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
}

fn push_subpage_items(out: &mut String, entries: &[SubpageEntry]) {
    for entry in entries {
        out.push_str(&format!(
            "<li><a data-content=\"{}\" href=\"#{0}\">{}</a>",
            escape_html(&entry.key),
            escape_html(&entry.label),
        ));
        if !entry.children.is_empty() {
            out.push_str("<ul>");
            push_subpage_items(out, &entry.children);
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
}

fn push_section(out: &mut String, section: &str, title: &str, collapsed: bool, body: &str) {
    let li_class = if collapsed {
        "toc-section collapsed"
    } else {
        "toc-section"
    };
    out.push_str(&format!("<li class=\"{li_class}\">"));
    out.push_str("<div class=\"toc-section-header\">");
    out.push_str(&format!(
        "<button class=\"toc-section-toggle\" data-section=\"{section}\">\u{25bc}</button>"
    ));
    out.push_str(&format!("<span class=\"toc-section-title\">{title}</span>"));
    out.push_str("</div>");
    out.push_str(&format!(
        "<ul class=\"toc-section-content\" data-section=\"{section}\">"
    ));
    out.push_str(body);
    out.push_str("</ul></li>");
}

/// Render the navigation section as a standalone `li.toc-section`.
///
/// Used both inside [`render_toc`] and when splicing a missing navigation
/// section into a TOC the build pipeline already embedded.
#[must_use]
pub fn render_nav_section(entries: &[SubpageEntry], collapsed: bool) -> String {
    let mut body = String::new();
    push_subpage_items(&mut body, entries);
    let mut out = String::new();
    push_section(&mut out, "navigation", "Pages", collapsed, &body);
    out
}

/// Render a full `nav.table-of-contents`. Heading section first, then the
/// navigation section; empty sections are omitted.
#[must_use]
pub fn render_toc(toc: &Toc, display: &TocDisplay) -> String {
    let nav_class = if display.collapsed {
        "table-of-contents collapsed"
    } else {
        "table-of-contents"
    };
    let mut out = format!("<nav class=\"{nav_class}\">");
    out.push_str("<div class=\"toc-header\"><div class=\"toc-header-left\"><ul>");

    if !toc.headings.is_empty() {
        let mut body = String::new();
        push_heading_items(&mut body, &toc.headings, display);
        push_section(
            &mut out,
            "headings",
            "Contents",
            display.headings_collapsed,
            &body,
        );
    }
    if !toc.subpages.is_empty() {
        out.push_str(&render_nav_section(
            &toc.subpages,
            display.navigation_collapsed,
        ));
    }

    out.push_str("</ul></div>");
    out.push_str("<div class=\"toc-header-right\">");
    out.push_str(
        "<button class=\"toc-toggle\" aria-label=\"Toggle table of contents\">\u{25bc}</button>",
    );
    out.push_str("</div></div></nav>");
    out
}

/// Add an `id` attribute inside a heading open tag.
fn tag_with_id(open_tag: &str, id: &str) -> String {
    match open_tag.strip_suffix('>') {
        Some(head) => format!("{head} id=\"{}\">", escape_html(id)),
        None => open_tag.to_owned(),
    }
}

/// Locate the insertion point for a navigation section inside an embedded
/// TOC: just before the last `</ul>` of the nav element.
fn nav_section_slot(body: &str) -> Option<usize> {
    let nav_start = body.find("table-of-contents")?;
    let nav_end = nav_start + body[nav_start..].find("</nav>")?;
    let slot = body[nav_start..nav_end].rfind("</ul>")?;
    Some(nav_start + slot)
}

/// Install a built TOC into a page body.
///
/// Headings that take part in the TOC get their anchor id written into the
/// markup, back to front so earlier byte offsets stay valid. The rendered
/// TOC lands after the first `</h1>`, or at the front of the body when the
/// page has no H1. A body that already embeds a build-time TOC keeps it;
/// only a missing navigation section is spliced in.
#[must_use]
pub fn splice_into_body(body: &str, scan: &PageScan, toc: &Toc, display: &TocDisplay) -> String {
    let mut out = body.to_owned();

    // Bytes inserted before the H1 splice point, to keep it valid.
    let mut h1_shift = 0;
    let plan = anchor_plan(scan);
    for (heading, anchor) in scan.headings.iter().zip(&plan).rev() {
        let Some(anchor) = anchor else { continue };
        if heading.existing_id.is_some() {
            continue;
        }
        let (start, end) = heading.tag_span;
        if end <= out.len() {
            let tagged = tag_with_id(&out[start..end], anchor);
            if scan.first_h1_end.is_some_and(|h1| start < h1) {
                h1_shift += tagged.len() - (end - start);
            }
            out.replace_range(start..end, &tagged);
        }
    }

    if toc.is_empty() {
        return out;
    }

    if scan.has_existing_toc {
        if !scan.has_nav_section && !toc.subpages.is_empty() {
            let section = render_nav_section(&toc.subpages, display.navigation_collapsed);
            match nav_section_slot(&out) {
                Some(slot) => out.insert_str(slot, &section),
                None => tracing::warn!("embedded TOC has no section list, skipping splice"),
            }
        }
        return out;
    }

    let rendered = render_toc(toc, display);
    match scan.first_h1_end.map(|end| end + h1_shift) {
        Some(end) if end <= out.len() => out.insert_str(end, &rendered),
        _ => out.insert_str(0, &rendered),
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use waymark_nav::NavTree;

    use super::*;
    use crate::scan::scan_page;
    use crate::toc::build_toc;

    const NAV: &str = concat!(
        "<nav id=\"sidebar\"><ul class=\"nav-level-1\">",
        "<li class=\"has-children\"><a data-content=\"guide\" href=\"#\">Guide</a>",
        "<ul class=\"nav-level-2\">",
        "<li><a data-content=\"guide-install\" href=\"#\">Install</a></li>",
        "</ul></li></ul></nav>",
    );

    fn built(body: &str, key: &str) -> (PageScan, Toc, TocDisplay) {
        let tree = NavTree::parse(NAV);
        let scan = scan_page(body);
        let toc = build_toc(&scan, &tree, key).unwrap_or_default();
        let display = TocDisplay::for_toc(&toc);
        (scan, toc, display)
    }

    #[test]
    fn test_render_heading_section_before_navigation() {
        let (_, toc, display) = built("<h2>Setup</h2>", "guide");

        let html = render_toc(&toc, &display);

        let headings = html.find(r#"data-section="headings""#).unwrap();
        let nav = html.find(r#"data-section="navigation""#).unwrap();
        assert!(headings < nav);
    }

    #[test]
    fn test_render_navigation_collapsed_with_headings_present() {
        let (_, toc, display) = built("<h2>Setup</h2>", "guide");

        assert!(display.navigation_collapsed);
        let html = render_toc(&toc, &display);
        assert!(html.contains(r#"<li class="toc-section collapsed"><div class="toc-section-header"><button class="toc-section-toggle" data-section="navigation">"#));
    }

    #[test]
    fn test_render_navigation_expanded_without_headings() {
        let (_, toc, display) = built("<p>No headings.</p>", "guide");

        assert!(!display.navigation_collapsed);
        let html = render_toc(&toc, &display);
        assert!(!html.contains(r#"data-section="headings""#));
        assert!(html.contains(r#"<li class="toc-section"><div class="toc-section-header"><button class="toc-section-toggle" data-section="navigation">"#));
    }

    #[test]
    fn test_render_escapes_text() {
        let (_, toc, display) = built("<h2>Pins &amp; Needles</h2>", "missing");

        let html = render_toc(&toc, &display);

        assert!(html.contains(">Pins &amp; Needles</a>"));
        assert!(html.contains(r##"href="#pins-needles""##));
    }

    #[test]
    fn test_splice_injects_heading_ids() {
        let (scan, toc, display) = built("<h1>T</h1><h2 class=\"x\">Setup</h2>", "missing");

        let out = splice_into_body("<h1>T</h1><h2 class=\"x\">Setup</h2>", &scan, &toc, &display);

        assert!(out.contains(r#"<h2 class="x" id="setup">"#));
    }

    #[test]
    fn test_splice_preserves_existing_ids() {
        let body = "<h2 id=\"keep\">Setup</h2>";
        let (scan, toc, display) = built(body, "missing");

        let out = splice_into_body(body, &scan, &toc, &display);

        assert_eq!(out.matches("id=").count(), 1);
        assert!(out.contains(r#"id="keep""#));
    }

    #[test]
    fn test_splice_inserts_after_first_h1() {
        let body = "<h1>Title</h1><h2>Setup</h2>";
        let (scan, toc, display) = built(body, "missing");

        let out = splice_into_body(body, &scan, &toc, &display);

        let h1 = out.find("</h1>").unwrap() + "</h1>".len();
        assert!(out[h1..].starts_with("<nav class=\"table-of-contents\">"));
    }

    #[test]
    fn test_splice_prepends_without_h1() {
        let body = "<h2>Setup</h2>";
        let (scan, toc, display) = built(body, "missing");

        let out = splice_into_body(body, &scan, &toc, &display);

        assert!(out.starts_with("<nav class=\"table-of-contents\">"));
    }

    #[test]
    fn test_splice_leaves_body_untouched_when_toc_empty() {
        let body = "<p>Nothing here.</p>";
        let (scan, toc, display) = built(body, "missing");

        assert_eq!(splice_into_body(body, &scan, &toc, &display), body);
    }

    #[test]
    fn test_splice_adds_nav_section_to_embedded_toc() {
        let body = concat!(
            "<h1>T</h1>",
            "<nav class=\"table-of-contents\"><div class=\"toc-header\">",
            "<div class=\"toc-header-left\"><ul>",
            "<li class=\"toc-section\">",
            "<ul class=\"toc-section-content\" data-section=\"headings\">",
            "<li><a href=\"#setup\">Setup</a></li></ul></li>",
            "</ul></div></div></nav>",
            "<h2 id=\"setup\">Setup</h2>",
        );
        let (scan, toc, display) = built(body, "guide");

        let out = splice_into_body(body, &scan, &toc, &display);

        // Exactly one TOC, now carrying both sections.
        assert_eq!(out.matches("table-of-contents").count(), 1);
        let nav_section = out.find(r#"data-section="navigation""#).unwrap();
        assert!(nav_section > out.find(r#"data-section="headings""#).unwrap());
        assert!(nav_section < out.find("</nav>").unwrap());
    }

    #[test]
    fn test_splice_keeps_embedded_toc_with_nav_section() {
        let body = concat!(
            "<nav class=\"table-of-contents\"><div class=\"toc-header\">",
            "<div class=\"toc-header-left\"><ul>",
            "<li class=\"toc-section\" data-section=\"navigation\"></li>",
            "</ul></div></div></nav>",
        );
        let (scan, toc, display) = built(body, "guide");

        let out = splice_into_body(body, &scan, &toc, &display);

        assert_eq!(out.matches(r#"data-section="navigation""#).count(), 1);
    }
}
