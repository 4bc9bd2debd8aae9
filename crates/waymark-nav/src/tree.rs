//! Navigation tree built from the rendered sidebar markup.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;

/// Fallback landing key when the navigation tree is empty.
const FALLBACK_KEY: &str = "home";

/// A single navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavNode {
    /// Content key (join key with content documents and session state).
    pub key: String,
    /// Display label.
    pub label: String,
    /// True if this item has child items.
    #[serde(rename = "hasChildren")]
    pub has_children: bool,
}

/// Read-only navigation tree with efficient key lookups.
///
/// Built once by parsing the sidebar markup produced by the build pipeline:
/// nested `<ul class="nav-level-N">` lists whose links carry a
/// `data-content` attribute. Sibling order is preserved; it determines the
/// default landing page and breadcrumb ordering.
pub struct NavTree {
    nodes: Vec<NavNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    key_index: HashMap<String, usize>,
}

impl NavTree {
    /// Parse the sidebar navigation markup into a tree.
    ///
    /// Malformed items (links without a `data-content` attribute, stray
    /// markup) are skipped with a warning rather than failing the whole
    /// tree; a page session can always start with whatever parsed.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        let mut builder = NavTreeBuilder::new();

        let mut reader = Reader::from_str(markup);
        reader.config_mut().check_end_names = false;

        // Parent node index for each open <ul>, and node index (once the
        // link is seen) for each open <li>.
        let mut ul_stack: Vec<Option<usize>> = Vec::new();
        let mut li_stack: Vec<Option<usize>> = Vec::new();
        let mut link: Option<(String, String)> = None;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"ul" => ul_stack.push(li_stack.last().copied().flatten()),
                    b"li" => li_stack.push(None),
                    b"a" => {
                        if li_stack.is_empty() {
                            continue;
                        }
                        let key = e.attributes().filter_map(Result::ok).find_map(|attr| {
                            (attr.key.as_ref() == b"data-content")
                                .then(|| attr.unescape_value().ok())
                                .flatten()
                        });
                        match key {
                            Some(key) => link = Some((key.into_owned(), String::new())),
                            None => {
                                tracing::warn!("navigation link without data-content, skipping");
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some((_, label)) = link.as_mut()
                        && let Ok(text) = reader.decoder().decode(&e)
                    {
                        label.push_str(&text);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    // Entity references inside labels (e.g. &amp;)
                    if let Some((_, label)) = link.as_mut()
                        && let Ok(entity) = reader.decoder().decode(&e)
                    {
                        match entity.as_ref() {
                            "amp" => label.push('&'),
                            "lt" => label.push('<'),
                            "gt" => label.push('>'),
                            "quot" => label.push('"'),
                            other => {
                                label.push('&');
                                label.push_str(other);
                                label.push(';');
                            }
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"ul" => {
                        ul_stack.pop();
                    }
                    b"li" => {
                        li_stack.pop();
                    }
                    b"a" => {
                        if let Some((key, label)) = link.take()
                            && let Some(slot) = li_stack.last_mut()
                        {
                            let parent = ul_stack.last().copied().flatten();
                            let idx = builder.add(key, label.trim().to_owned(), parent);
                            *slot = Some(idx);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "navigation markup parse error, stopping");
                    break;
                }
            }
            buf.clear();
        }

        builder.build()
    }

    /// Look up a node by content key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NavNode> {
        self.key_index.get(key).map(|&i| &self.nodes[i])
    }

    /// Children of a key, in sibling order. Empty if the key is unknown.
    #[must_use]
    pub fn children_of(&self, key: &str) -> Vec<&NavNode> {
        self.key_index.get(key).map_or_else(Vec::new, |&i| {
            self.children[i].iter().map(|&j| &self.nodes[j]).collect()
        })
    }

    /// Ancestors of a key, root first, nearest parent last.
    ///
    /// A key absent from the tree has no ancestors (it is treated as a
    /// root-level page for breadcrumb purposes only).
    #[must_use]
    pub fn ancestors_of(&self, key: &str) -> Vec<&NavNode> {
        let Some(&idx) = self.key_index.get(key) else {
            return Vec::new();
        };

        let mut ancestors = Vec::new();
        let mut current = self.parents[idx];
        while let Some(i) = current {
            ancestors.push(&self.nodes[i]);
            current = self.parents[i];
        }
        ancestors.reverse();
        ancestors
    }

    /// Content key of the first top-level navigation item.
    ///
    /// This determines the default landing page. Falls back to `"home"`
    /// when the tree is empty.
    #[must_use]
    pub fn first_top_level(&self) -> &str {
        self.roots
            .first()
            .map_or(FALLBACK_KEY, |&i| self.nodes[i].key.as_str())
    }

    /// Top-level nodes in sibling order.
    #[must_use]
    pub fn roots(&self) -> Vec<&NavNode> {
        self.roots.iter().map(|&i| &self.nodes[i]).collect()
    }

    /// True if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builder assembling the flat node representation.
struct NavTreeBuilder {
    nodes: Vec<NavNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl NavTreeBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn add(&mut self, key: String, label: String, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(NavNode {
            key,
            label,
            has_children: false,
        });
        self.children.push(Vec::new());
        self.parents.push(parent);

        if let Some(p) = parent {
            self.children[p].push(idx);
        } else {
            self.roots.push(idx);
        }
        idx
    }

    fn build(self) -> NavTree {
        let Self {
            mut nodes,
            children,
            parents,
            roots,
        } = self;

        for (idx, node) in nodes.iter_mut().enumerate() {
            node.has_children = !children[idx].is_empty();
        }

        // Last occurrence wins for duplicate keys; keys are expected unique.
        let key_index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.key.clone(), i))
            .collect();

        NavTree {
            nodes,
            children,
            parents,
            roots,
            key_index,
        }
    }
}
