//! Sitemap generation.
//!
//! One `<url>` per content key, fragment-addressed (`{base_url}#{key}`),
//! with priority derived from navigation depth: the landing page gets 1.0
//! and each level below the top steps down.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use waymark_nav::{NavNode, NavTree};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn priority(tree: &NavTree, node: &NavNode) -> f32 {
    if node.key == tree.first_top_level() {
        return 1.0;
    }
    match tree.ancestors_of(&node.key).len() {
        0 => 0.9,
        1 => 0.7,
        2 => 0.6,
        _ => 0.5,
    }
}

/// Collect every key in the tree, depth first in sidebar order.
fn walk<'a>(tree: &'a NavTree, nodes: &[&'a NavNode], out: &mut Vec<&'a NavNode>) {
    for node in nodes {
        out.push(node);
        walk(tree, &tree.children_of(&node.key), out);
    }
}

/// Render `sitemap.xml` for a composed navigation tree.
///
/// # Errors
///
/// Returns an error if XML serialization fails.
pub fn write_sitemap(tree: &NavTree, base_url: &str) -> std::io::Result<String> {
    let mut nodes = Vec::new();
    walk(tree, &tree.roots(), &mut nodes);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for node in nodes {
        writer.write_event(Event::Start(BytesStart::new("url")))?;

        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        let loc = format!("{base_url}#{}", node.key);
        writer.write_event(Event::Text(BytesText::new(&loc)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;

        writer.write_event(Event::Start(BytesStart::new("priority")))?;
        let priority = format!("{:.1}", priority(tree, node));
        writer.write_event(Event::Text(BytesText::new(&priority)))?;
        writer.write_event(Event::End(BytesEnd::new("priority")))?;

        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let bytes = writer.into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
