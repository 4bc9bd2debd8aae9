//! Hierarchical table-of-contents model.
//!
//! Headings nest by level: an H3 attaches to the nearest preceding H2
//! (top level otherwise), an H4 to the nearest H3, falling back to the
//! nearest H2, then top level. Headings ending with `:` are category
//! labels and are excluded, though they still consume an ordinal so
//! fallback anchors stay stable across the exclusion.

use std::collections::HashSet;

use serde::Serialize;
use waymark_nav::NavTree;

use crate::scan::PageScan;
use crate::slug::{anchor_id, unique_anchor_id};

/// Heading levels that participate in the TOC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

/// One heading entry with its nested children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingItem {
    pub text: String,
    /// In-page anchor the entry links to.
    pub anchor: String,
    pub level: HeadingLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HeadingItem>,
}

/// One entry in the subpage navigation section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubpageEntry {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SubpageEntry>,
}

/// Table of contents for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toc {
    /// Nested heading entries, document order.
    pub headings: Vec<HeadingItem>,
    /// Sibling/child pages from the navigation tree.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subpages: Vec<SubpageEntry>,
}

impl Toc {
    /// True if neither section has anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.subpages.is_empty()
    }

    /// Default collapse state for the navigation section. Collapsed
    /// whenever the heading section has entries, expanded otherwise.
    #[must_use]
    pub fn nav_collapsed_default(&self) -> bool {
        !self.headings.is_empty()
    }
}

fn is_category_label(text: &str) -> bool {
    text.trim_end().ends_with(':')
}

/// Anchor assignment per scanned heading. `None` marks a category label
/// that takes no part in the TOC. Existing `id` attributes win over
/// derived anchors and still reserve their slug against duplicates.
pub(crate) fn anchor_plan(scan: &PageScan) -> Vec<Option<String>> {
    let mut used = HashSet::new();
    scan.headings
        .iter()
        .map(|heading| {
            if is_category_label(&heading.text) {
                return None;
            }
            Some(match &heading.existing_id {
                Some(id) => {
                    used.insert(id.clone());
                    id.clone()
                }
                None => {
                    let base = anchor_id(&heading.text, heading.ordinal);
                    unique_anchor_id(&base, &mut used)
                }
            })
        })
        .collect()
}

/// Build the heading section from a page scan.
///
/// Anchor ids reuse an existing `id` attribute when the heading has one;
/// otherwise they are derived from the text with duplicate suffixing.
#[must_use]
pub fn heading_items(scan: &PageScan) -> Vec<HeadingItem> {
    let plan = anchor_plan(scan);
    let mut top: Vec<HeadingItem> = Vec::new();

    for (heading, anchor) in scan.headings.iter().zip(plan) {
        let Some(anchor) = anchor else {
            continue;
        };
        let item = HeadingItem {
            text: heading.text.clone(),
            anchor,
            level: heading.level,
            children: Vec::new(),
        };

        match heading.level {
            HeadingLevel::H2 => top.push(item),
            HeadingLevel::H3 => match top.last_mut() {
                Some(h2) if h2.level == HeadingLevel::H2 => h2.children.push(item),
                _ => top.push(item),
            },
            HeadingLevel::H4 => {
                // Nearest H3, else the H2 it would have nested under.
                match top.last_mut() {
                    Some(h2) if h2.level == HeadingLevel::H2 => match h2.children.last_mut() {
                        Some(h3) if h3.level == HeadingLevel::H3 => h3.children.push(item),
                        _ => h2.children.push(item),
                    },
                    Some(h3) if h3.level == HeadingLevel::H3 => h3.children.push(item),
                    _ => top.push(item),
                }
            }
        }
    }

    top
}

/// Build the subpage section for `key` from the navigation tree.
///
/// Enumerates the parent's children subtree in sibling order, splicing the
/// current page's own children in where its entry would sit. A root-level
/// page has no parent, so its own children form the section instead; a
/// root-level leaf (or a key absent from the tree) gets an empty section.
#[must_use]
pub fn subpage_entries(tree: &NavTree, key: &str) -> Vec<SubpageEntry> {
    let base = match tree.ancestors_of(key).last() {
        Some(parent) => tree.children_of(&parent.key),
        None => tree.children_of(key),
    };
    entries_under(tree, key, &base)
}

fn entries_under(tree: &NavTree, key: &str, nodes: &[&waymark_nav::NavNode]) -> Vec<SubpageEntry> {
    let mut entries = Vec::new();
    for node in nodes {
        let subtree = tree.children_of(&node.key);
        if node.key == key {
            entries.extend(entries_under(tree, key, &subtree));
        } else {
            entries.push(SubpageEntry {
                key: node.key.clone(),
                label: node.label.clone(),
                children: entries_under(tree, key, &subtree),
            });
        }
    }
    entries
}

/// Build the full TOC for a page, or `None` when it would be empty.
#[must_use]
pub fn build_toc(scan: &PageScan, tree: &NavTree, key: &str) -> Option<Toc> {
    let toc = Toc {
        headings: heading_items(scan),
        subpages: subpage_entries(tree, key),
    };
    (!toc.is_empty()).then_some(toc)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scan::scan_page;

    const NAV: &str = concat!(
        "<nav id=\"sidebar\"><ul class=\"nav-level-1\">",
        "<li class=\"has-children\"><a data-content=\"guide\" href=\"#\">Guide</a>",
        "<ul class=\"nav-level-2\">",
        "<li><a data-content=\"guide-install\" href=\"#\">Install</a></li>",
        "<li><a data-content=\"guide-usage\" href=\"#\">Usage</a></li>",
        "</ul></li>",
        "<li><a data-content=\"faq\" href=\"#\">FAQ</a></li>",
        "</ul></nav>",
    );

    fn items(body: &str) -> Vec<HeadingItem> {
        heading_items(&scan_page(body))
    }

    #[test]
    fn test_h3_nests_under_preceding_h2() {
        let toc = items("<h2>Setup</h2><h3>Linux</h3><h3>Mac</h3><h2>Usage</h2>");

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].text, "Setup");
        let nested: Vec<_> = toc[0].children.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(nested, vec!["Linux", "Mac"]);
        assert!(toc[1].children.is_empty());
    }

    #[test]
    fn test_h3_without_h2_goes_top_level() {
        let toc = items("<h3>Orphan</h3><h2>Setup</h2>");

        assert_eq!(toc[0].text, "Orphan");
        assert_eq!(toc[0].level, HeadingLevel::H3);
    }

    #[test]
    fn test_sibling_orphan_h3s_stay_top_level() {
        let toc = items("<h3>First</h3><h3>Second</h3>");

        assert_eq!(toc.len(), 2);
        assert!(toc[0].children.is_empty());
    }

    #[test]
    fn test_h4_falls_back_to_h2_without_h3() {
        let toc = items("<h2>Setup</h2><h4>Detail</h4>");

        assert_eq!(toc[0].children[0].text, "Detail");
        assert_eq!(toc[0].children[0].level, HeadingLevel::H4);
    }

    #[test]
    fn test_h4_nests_under_h3() {
        let toc = items("<h2>Setup</h2><h3>Linux</h3><h4>Debian</h4>");

        assert_eq!(toc[0].children[0].children[0].text, "Debian");
    }

    #[test]
    fn test_h3_after_h4_returns_to_h2() {
        let toc = items("<h2>A</h2><h3>B</h3><h4>C</h4><h3>D</h3>");

        assert_eq!(toc.len(), 1);
        let a = &toc[0];
        let children: Vec<_> = a.children.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(children, vec!["B", "D"]);
        assert_eq!(a.children[0].children[0].text, "C");
        assert!(a.children[1].children.is_empty());
    }

    #[test]
    fn test_prerequisites_label_never_in_toc() {
        let toc = items("<h2>Prerequisites:</h2><h2>Install</h2>");

        assert!(toc.iter().all(|h| h.text != "Prerequisites:"));
        let plan = anchor_plan(&scan_page("<h2>Prerequisites:</h2><h2>Install</h2>"));
        assert_eq!(plan[0], None);
    }

    #[test]
    fn test_category_labels_excluded_but_keep_ordinals() {
        // "Ab" slugs to "ab" (2 chars, kept); "" falls back to its ordinal.
        let toc = items("<h2>Tools:</h2><h2>Ab</h2><h2>🚀</h2>");

        let texts: Vec<_> = toc.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Ab", "🚀"]);
        // The excluded label still held ordinal 0, so the fallback is 2.
        assert_eq!(toc[1].anchor, "heading-2");
    }

    #[test]
    fn test_existing_id_reused() {
        let toc = items("<h2 id=\"custom-anchor\">Setup</h2>");

        assert_eq!(toc[0].anchor, "custom-anchor");
    }

    #[test]
    fn test_duplicate_anchors_suffixed() {
        let toc = items("<h2>Setup</h2><h2>Setup</h2><h2>Setup</h2>");

        let anchors: Vec<_> = toc.iter().map(|h| h.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_subpages_list_children_when_present() {
        let tree = NavTree::parse(NAV);

        let entries = subpage_entries(&tree, "guide");

        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["guide-install", "guide-usage"]);
    }

    #[test]
    fn test_subpages_list_siblings_without_self() {
        let tree = NavTree::parse(NAV);

        let entries = subpage_entries(&tree, "guide-install");

        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["guide-usage"]);
    }

    #[test]
    fn test_leaf_root_has_no_subpages() {
        let tree = NavTree::parse(NAV);

        assert!(subpage_entries(&tree, "faq").is_empty());
    }

    #[test]
    fn test_subpage_splice_carries_grandchildren() {
        let nav = concat!(
            "<nav id=\"sidebar\"><ul class=\"nav-level-1\">",
            "<li class=\"has-children\"><a data-content=\"guide\" href=\"#\">Guide</a>",
            "<ul class=\"nav-level-2\">",
            "<li class=\"has-children\"><a data-content=\"install\" href=\"#\">Install</a>",
            "<ul class=\"nav-level-3\">",
            "<li><a data-content=\"install-linux\" href=\"#\">Linux</a></li>",
            "</ul></li>",
            "<li><a data-content=\"usage\" href=\"#\">Usage</a></li>",
            "</ul></li></ul></nav>",
        );
        let tree = NavTree::parse(nav);

        // The current page's entry is replaced by its own children.
        let entries = subpage_entries(&tree, "install");

        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["install-linux", "usage"]);

        // A sibling keeps the full subtree nested under the other entry.
        let entries = subpage_entries(&tree, "usage");
        assert_eq!(entries[0].key, "install");
        assert_eq!(entries[0].children[0].key, "install-linux");
    }

    #[test]
    fn test_build_toc_none_when_empty() {
        let tree = NavTree::parse("<nav id=\"sidebar\"></nav>");

        assert!(build_toc(&scan_page("<p>No headings.</p>"), &tree, "missing").is_none());
    }

    #[test]
    fn test_build_toc_labels_from_tree() {
        let tree = NavTree::parse(NAV);

        let toc = build_toc(&scan_page("<h2>Setup</h2>"), &tree, "guide").unwrap();

        assert_eq!(toc.headings[0].anchor, "setup");
        assert_eq!(toc.subpages[0].label, "Install");
    }
}
