//! Navigation tree and breadcrumbs for waymark.
//!
//! This crate provides:
//! - [`NavTree`]: read-only view over the statically rendered sidebar markup,
//!   with O(1) content-key lookups and structural queries
//! - Breadcrumb building from the ancestor chain of a content key
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<NavNode>` with parent/children
//! relationships tracked by indices, giving O(1) key lookups via a `HashMap`
//! index and O(d) breadcrumb building where d is the node depth. The tree is
//! built once from the navigation markup and is immutable for the session.
//!
//! # Quick Start
//!
//! ```
//! use waymark_nav::NavTree;
//!
//! let markup = r##"<nav id="sidebar"><ul class="nav-level-1">
//!   <li><a data-content="guide" href="#">Guide</a></li>
//! </ul></nav>"##;
//!
//! let tree = NavTree::parse(markup);
//! assert_eq!(tree.first_top_level(), "guide");
//! let crumbs = tree.breadcrumbs("guide");
//! assert_eq!(crumbs.len(), 1);
//! ```

mod breadcrumbs;
mod tree;

pub use breadcrumbs::Crumb;
pub use tree::{NavNode, NavTree};
