//! Typed schema over the raw session entries.
//!
//! Key shapes are part of the persisted contract and must not change:
//!
//! ```text
//! currentPage                         last activated content key
//! expandedMenuItems                   JSON array of content keys
//! tocCollapsed-{key}                  whole-TOC collapse per page
//! toc-section-{key}-{section}         per-section collapse per page
//! toc-heading-{key}-{headingText}     per-heading collapse per page
//! sidebarCollapsed                    sidebar collapse, site-wide
//! ```
//!
//! Boolean entries are stored as JSON booleans. Malformed stored values
//! read as absent so a damaged session never blocks navigation.

use std::collections::HashSet;

use crate::SessionStore;

/// Typed accessors over a [`SessionStore`].
pub struct SessionState {
    store: Box<dyn SessionStore>,
}

fn parse_bool(key: &str, raw: &str) -> Option<bool> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed session entry ignored");
            None
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The last activated content key, if one was persisted.
    #[must_use]
    pub fn current_page(&self) -> Option<String> {
        self.store.get("currentPage").filter(|key| !key.is_empty())
    }

    pub fn set_current_page(&self, key: &str) {
        self.store.set("currentPage", key);
    }

    /// Clear the persisted page so a reload cannot loop on a broken key.
    pub fn clear_current_page(&self) {
        self.store.remove("currentPage");
    }

    /// Sidebar menu items currently expanded.
    #[must_use]
    pub fn expanded_menu(&self) -> HashSet<String> {
        let Some(raw) = self.store.get("expandedMenuItems") else {
            return HashSet::new();
        };
        match serde_json::from_str(&raw) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "malformed expandedMenuItems ignored");
                HashSet::new()
            }
        }
    }

    pub fn expand_menu_item(&self, key: &str) {
        let mut keys = self.expanded_menu();
        if keys.insert(key.to_owned()) {
            self.write_menu(&keys);
        }
    }

    pub fn collapse_menu_item(&self, key: &str) {
        let mut keys = self.expanded_menu();
        if keys.remove(key) {
            self.write_menu(&keys);
        }
    }

    fn write_menu(&self, keys: &HashSet<String>) {
        // Sorted for a stable serialized form.
        let mut ordered: Vec<&str> = keys.iter().map(String::as_str).collect();
        ordered.sort_unstable();
        match serde_json::to_string(&ordered) {
            Ok(json) => self.store.set("expandedMenuItems", &json),
            Err(e) => tracing::warn!(error = %e, "expandedMenuItems serialize failed"),
        }
    }

    /// Whole-TOC collapse for a page. `None` when never toggled.
    #[must_use]
    pub fn toc_collapsed(&self, key: &str) -> Option<bool> {
        let entry = format!("tocCollapsed-{key}");
        parse_bool(&entry, &self.store.get(&entry)?)
    }

    pub fn set_toc_collapsed(&self, key: &str, collapsed: bool) {
        self.store
            .set(&format!("tocCollapsed-{key}"), bool_str(collapsed));
    }

    /// Per-section collapse for a page. `section` is the `data-section`
    /// name, `headings` or `navigation`.
    #[must_use]
    pub fn section_collapsed(&self, key: &str, section: &str) -> Option<bool> {
        let entry = format!("toc-section-{key}-{section}");
        parse_bool(&entry, &self.store.get(&entry)?)
    }

    pub fn set_section_collapsed(&self, key: &str, section: &str, collapsed: bool) {
        self.store
            .set(&format!("toc-section-{key}-{section}"), bool_str(collapsed));
    }

    /// Per-heading collapse for a page, keyed by heading text.
    #[must_use]
    pub fn heading_collapsed(&self, key: &str, heading: &str) -> Option<bool> {
        let entry = format!("toc-heading-{key}-{heading}");
        parse_bool(&entry, &self.store.get(&entry)?)
    }

    pub fn set_heading_collapsed(&self, key: &str, heading: &str, collapsed: bool) {
        self.store
            .set(&format!("toc-heading-{key}-{heading}"), bool_str(collapsed));
    }

    #[must_use]
    pub fn sidebar_collapsed(&self) -> bool {
        self.store
            .get("sidebarCollapsed")
            .and_then(|raw| parse_bool("sidebarCollapsed", &raw))
            .unwrap_or(false)
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.store.set("sidebarCollapsed", bool_str(collapsed));
    }

    /// Direct access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        &*self.store
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MemorySession;

    fn state() -> SessionState {
        SessionState::new(Box::new(MemorySession::new()))
    }

    #[test]
    fn test_current_page_round_trip() {
        let state = state();

        assert_eq!(state.current_page(), None);
        state.set_current_page("guide");
        assert_eq!(state.current_page().as_deref(), Some("guide"));
        state.clear_current_page();
        assert_eq!(state.current_page(), None);
    }

    #[test]
    fn test_raw_keys_match_persisted_contract() {
        let state = state();

        state.set_current_page("guide");
        state.expand_menu_item("guide");
        state.set_toc_collapsed("guide", true);
        state.set_section_collapsed("guide", "navigation", true);
        state.set_heading_collapsed("guide", "Getting Started", false);
        state.set_sidebar_collapsed(true);

        let store = state.store();
        assert_eq!(store.get("currentPage").as_deref(), Some("guide"));
        assert_eq!(store.get("expandedMenuItems").as_deref(), Some(r#"["guide"]"#));
        assert_eq!(store.get("tocCollapsed-guide").as_deref(), Some("true"));
        assert_eq!(store.get("toc-section-guide-navigation").as_deref(), Some("true"));
        assert_eq!(
            store.get("toc-heading-guide-Getting Started").as_deref(),
            Some("false")
        );
        assert_eq!(store.get("sidebarCollapsed").as_deref(), Some("true"));
    }

    #[test]
    fn test_expanded_menu_set_semantics() {
        let state = state();

        state.expand_menu_item("guide");
        state.expand_menu_item("api");
        state.expand_menu_item("guide");
        assert_eq!(state.expanded_menu().len(), 2);

        state.collapse_menu_item("guide");
        assert!(!state.expanded_menu().contains("guide"));
        assert!(state.expanded_menu().contains("api"));
    }

    #[test]
    fn test_malformed_entries_read_as_absent() {
        let state = state();

        state.store().set("tocCollapsed-guide", "maybe");
        state.store().set("expandedMenuItems", "{broken");
        state.store().set("sidebarCollapsed", "42");

        assert_eq!(state.toc_collapsed("guide"), None);
        assert!(state.expanded_menu().is_empty());
        assert!(!state.sidebar_collapsed());
    }

    #[test]
    fn test_section_and_heading_default_absent() {
        let state = state();

        assert_eq!(state.section_collapsed("guide", "navigation"), None);
        assert_eq!(state.heading_collapsed("guide", "Setup"), None);
    }
}
