//! Breadcrumb trail derived from the navigation tree.

use serde::Serialize;

use crate::tree::NavTree;

/// One entry in a breadcrumb trail.
///
/// Positions are 1-indexed for structured-data annotation. Every entry
/// except the current page is rendered as a link; the current page is
/// plain text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Content key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// 1-indexed position in the trail.
    pub position: usize,
    /// True only for the last entry (the current page).
    #[serde(rename = "isCurrent")]
    pub is_current: bool,
}

impl NavTree {
    /// Build the breadcrumb trail for a content key, root first.
    ///
    /// The trail always begins with the first top-level navigation item
    /// (label `"Home"` when the tree is empty). If `key` is that item, it
    /// is the sole, current entry. Otherwise the ancestors of `key` follow,
    /// then `key` itself; a duplicate leading ancestor equal to the first
    /// top-level item is skipped. Keys unknown to the tree get a two-entry
    /// trail (first item, then the key labelled by itself).
    #[must_use]
    pub fn breadcrumbs(&self, key: &str) -> Vec<Crumb> {
        let first_key = self.first_top_level().to_owned();
        let first_label = self
            .get(&first_key)
            .map_or_else(|| "Home".to_owned(), |node| node.label.clone());

        if key == first_key {
            return vec![Crumb {
                key: first_key,
                label: first_label,
                position: 1,
                is_current: true,
            }];
        }

        let mut crumbs = vec![Crumb {
            key: first_key.clone(),
            label: first_label,
            position: 1,
            is_current: false,
        }];

        for ancestor in self.ancestors_of(key) {
            // Already emitted as the leading entry
            if ancestor.key == first_key {
                continue;
            }
            crumbs.push(Crumb {
                key: ancestor.key.clone(),
                label: ancestor.label.clone(),
                position: crumbs.len() + 1,
                is_current: false,
            });
        }

        let label = self
            .get(key)
            .map_or_else(|| key.to_owned(), |node| node.label.clone());
        crumbs.push(Crumb {
            key: key.to_owned(),
            label,
            position: crumbs.len() + 1,
            is_current: true,
        });

        crumbs
    }
}
