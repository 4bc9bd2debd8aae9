//! Page activation pipeline.
//!
//! [`ContentLoader`] owns the single current-content-key pointer and the
//! content seam. One `load` call takes a key from fetched body to a fully
//! assembled [`PageView`]: TOC built and spliced, metadata derived,
//! breadcrumbs built, in that order.

use waymark_content::{ContentError, ContentSource};
use waymark_nav::{Crumb, NavTree};
use waymark_state::SessionState;
use waymark_toc::{Toc, TocDisplay, build_toc, escape_html, scan_page, splice_into_body};

use crate::meta::{PageMeta, SiteInfo};

/// Everything the host needs to render one activated page.
#[derive(Clone, Debug)]
pub struct PageView {
    /// Content key of the page.
    pub key: String,
    /// Page body with anchor ids and TOC spliced in.
    pub html: String,
    /// Built TOC, `None` when the page yields neither headings nor subpages.
    pub toc: Option<Toc>,
    /// Derived document metadata.
    pub meta: PageMeta,
    /// Breadcrumb trail for the page.
    pub breadcrumbs: Vec<Crumb>,
    /// In-page anchor to scroll to once rendered.
    pub scroll_target: Option<String>,
    /// Monotonic load counter. An asynchronous host can compare against
    /// the latest accepted generation and discard a stale completion.
    pub generation: u64,
}

/// Result of a load request.
#[derive(Debug)]
pub enum Outcome {
    /// The key is already the current page; the source was not touched.
    /// A same-page anchor link still carries its scroll target so the
    /// host can scroll without a reload.
    AlreadyCurrent { scroll_target: Option<String> },
    /// The page was activated.
    Loaded(Box<PageView>),
    /// Retrieval failed; the placeholder replaces the content area.
    Failed {
        key: String,
        placeholder: String,
        error: ContentError,
    },
}

/// Loads page bodies and assembles them into [`PageView`]s.
pub struct ContentLoader {
    source: Box<dyn ContentSource>,
    site: SiteInfo,
    current: Option<String>,
    generation: u64,
}

impl ContentLoader {
    #[must_use]
    pub fn new(source: Box<dyn ContentSource>, site: SiteInfo) -> Self {
        Self {
            source,
            site,
            current: None,
            generation: 0,
        }
    }

    /// The currently loaded content key.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Load and activate `key`.
    ///
    /// Loading the current key again skips the fetch, passing any scroll
    /// target back through the outcome. On failure the current
    /// pointer resets and the persisted page entry is cleared so the next
    /// startup does not loop on a broken key.
    pub fn load(
        &mut self,
        key: &str,
        scroll_target: Option<String>,
        tree: &NavTree,
        session: &SessionState,
        persist: bool,
    ) -> Outcome {
        if self.current.as_deref() == Some(key) {
            tracing::debug!(key, "already current, skipping load");
            return Outcome::AlreadyCurrent { scroll_target };
        }

        self.generation += 1;
        let body = match self.source.fetch(key) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(key, error = %error, "content retrieval failed");
                self.current = None;
                session.clear_current_page();
                return Outcome::Failed {
                    key: key.to_owned(),
                    placeholder: error_placeholder(key),
                    error,
                };
            }
        };

        let scan = scan_page(&body);
        let toc = build_toc(&scan, tree, key);
        let display = display_for(session, key, toc.as_ref());
        let html = match &toc {
            Some(toc) => splice_into_body(&body, &scan, toc, &display),
            None => splice_into_body(&body, &scan, &Toc::default(), &display),
        };

        // Fixed post-install order: metadata, then breadcrumbs.
        let meta = PageMeta::derive(&scan, key, &self.site);
        let breadcrumbs = tree.breadcrumbs(key);

        self.current = Some(key.to_owned());
        if persist {
            session.set_current_page(key);
        }

        Outcome::Loaded(Box::new(PageView {
            key: key.to_owned(),
            html,
            toc,
            meta,
            breadcrumbs,
            scroll_target,
            generation: self.generation,
        }))
    }
}

/// Collapse state for a page, persisted overrides over built defaults.
fn display_for(session: &SessionState, key: &str, toc: Option<&Toc>) -> TocDisplay {
    let mut display = toc.map(TocDisplay::for_toc).unwrap_or_default();
    if let Some(collapsed) = session.toc_collapsed(key) {
        display.collapsed = collapsed;
    }
    if let Some(collapsed) = session.section_collapsed(key, "headings") {
        display.headings_collapsed = collapsed;
    }
    if let Some(collapsed) = session.section_collapsed(key, "navigation") {
        display.navigation_collapsed = collapsed;
    }
    if let Some(toc) = toc {
        collect_collapsed(session, key, &toc.headings, &mut display);
    }
    display
}

fn collect_collapsed(
    session: &SessionState,
    key: &str,
    headings: &[waymark_toc::HeadingItem],
    display: &mut TocDisplay,
) {
    for heading in headings {
        if session.heading_collapsed(key, &heading.text) == Some(true) {
            display.collapsed_headings.insert(heading.text.clone());
        }
        collect_collapsed(session, key, &heading.children, display);
    }
}

/// Inline error markup replacing the content area on retrieval failure.
fn error_placeholder(key: &str) -> String {
    format!(
        concat!(
            "<div class=\"content-error\">",
            "<h1>Page unavailable</h1>",
            "<p>The page <code>{}</code> could not be loaded. ",
            "Use the navigation to try another page.</p>",
            "</div>",
        ),
        escape_html(key)
    )
}
