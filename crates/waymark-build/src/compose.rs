//! Sidebar navigation composer.
//!
//! Turns a markdown bullet list of `[Label](#key)` links into the sidebar
//! markup the navigation tree parses at view time: nested `nav-level-N`
//! lists, `data-content` keys, `has-children` flags and toggle buttons.
//! The first top-level link determines the default landing page.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use waymark_toc::escape_html;

use crate::BuildError;

#[derive(Debug, Default)]
struct NavItem {
    key: String,
    label: String,
    children: Vec<NavItem>,
}

/// Parse the first bullet list in the markdown into an item tree.
fn parse_items(markdown: &str) -> Vec<NavItem> {
    let mut lists: Vec<Vec<NavItem>> = Vec::new();
    let mut open_items: Vec<NavItem> = Vec::new();
    let mut in_link = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::List(_)) => lists.push(Vec::new()),
            Event::Start(Tag::Item) => open_items.push(NavItem::default()),
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(item) = open_items.last_mut() {
                    item.key = dest_url.trim_start_matches('#').to_owned();
                    in_link = true;
                }
            }
            Event::End(TagEnd::Link) => in_link = false,
            Event::Text(text) | Event::Code(text) => {
                if in_link
                    && let Some(item) = open_items.last_mut()
                {
                    item.label.push_str(&text);
                }
            }
            Event::End(TagEnd::Item) => {
                if let (Some(item), Some(list)) = (open_items.pop(), lists.last_mut()) {
                    if item.key.is_empty() {
                        tracing::warn!(label = %item.label, "nav item without link skipped");
                    } else {
                        list.push(item);
                    }
                }
            }
            Event::End(TagEnd::List(_)) => {
                let Some(finished) = lists.pop() else { continue };
                match open_items.last_mut() {
                    Some(parent) => parent.children = finished,
                    // First top-level list wins, the rest is ignored.
                    None => return finished,
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

fn push_item(out: &mut Vec<String>, item: &NavItem, level: usize) {
    let has_children = !item.children.is_empty();
    out.push(if has_children {
        "<li class=\"has-children\">".to_owned()
    } else {
        "<li>".to_owned()
    });

    let link = format!(
        "<a data-content=\"{}\" href=\"#\">{}</a>",
        escape_html(&item.key),
        escape_html(item.label.trim()),
    );
    if has_children {
        out.push("<div class=\"nav-item-wrapper\">".to_owned());
        out.push(link);
        out.push("<button aria-label=\"Toggle submenu\" class=\"nav-toggle\">\u{25bc}</button>".to_owned());
        out.push("</div>".to_owned());
        out.push(format!("<ul class=\"nav-level-{}\">", level + 1));
        for child in &item.children {
            push_item(out, child, level + 1);
        }
        out.push("</ul>".to_owned());
    } else {
        out.push(link);
    }
    out.push("</li>".to_owned());
}

/// Compose the sidebar markup from a markdown navigation source.
///
/// # Errors
///
/// Returns [`BuildError::EmptyNav`] when the source contains no usable
/// list items.
pub fn compose_nav(markdown: &str) -> Result<String, BuildError> {
    let items = parse_items(markdown);
    if items.is_empty() {
        return Err(BuildError::EmptyNav);
    }

    let mut parts = vec![
        "<nav id=\"sidebar\">".to_owned(),
        "<button aria-label=\"Toggle sidebar\" class=\"sidebar-toggle\" id=\"sidebar-toggle\">\u{25c0}</button>".to_owned(),
        "<ul class=\"nav-level-1\">".to_owned(),
    ];
    for item in &items {
        push_item(&mut parts, item, 1);
    }
    parts.push("</ul>".to_owned());
    parts.push("</nav>".to_owned());
    Ok(parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use waymark_nav::NavTree;

    use super::*;

    const NAV_MD: &str = "\
- [Home](#home)
- [Guide](#guide)
  - [Install](#guide-install)
  - [Usage](#guide-usage)
- [FAQ](#faq)
";

    #[test]
    fn test_compose_flat_item() {
        let markup = compose_nav("- [Home](#home)\n").unwrap();

        assert!(markup.contains("<nav id=\"sidebar\">"));
        assert!(markup.contains("<ul class=\"nav-level-1\">"));
        assert!(markup.contains("<li>\n<a data-content=\"home\" href=\"#\">Home</a>\n</li>"));
        assert!(!markup.contains("has-children"));
    }

    #[test]
    fn test_compose_nested_items() {
        let markup = compose_nav(NAV_MD).unwrap();

        assert!(markup.contains("<li class=\"has-children\">"));
        assert!(markup.contains("<div class=\"nav-item-wrapper\">"));
        assert!(markup.contains("class=\"nav-toggle\""));
        assert!(markup.contains("<ul class=\"nav-level-2\">"));
        assert!(markup.contains("<a data-content=\"guide-install\" href=\"#\">Install</a>"));
    }

    #[test]
    fn test_compose_escapes_labels() {
        let markup = compose_nav("- [Pins & Needles](#pins)\n").unwrap();

        assert!(markup.contains(">Pins &amp; Needles</a>"));
    }

    #[test]
    fn test_compose_empty_source_errors() {
        assert!(matches!(
            compose_nav("no list here\n"),
            Err(BuildError::EmptyNav)
        ));
    }

    #[test]
    fn test_composed_markup_round_trips_through_tree() {
        let markup = compose_nav(NAV_MD).unwrap();

        let tree = NavTree::parse(&markup);

        assert_eq!(tree.first_top_level(), "home");
        let children: Vec<_> = tree
            .children_of("guide")
            .iter()
            .map(|n| n.key.clone())
            .collect();
        assert_eq!(children, vec!["guide-install", "guide-usage"]);
        assert!(tree.get("guide").unwrap().has_children);
        assert_eq!(tree.ancestors_of("guide-usage")[0].key, "guide");
    }
}
