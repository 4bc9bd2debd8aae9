//! Content router for Waymark.
//!
//! Ties the navigation tree, content seam, TOC builder and session state
//! into one page-activation pipeline:
//!
//! - [`Router`]: state machine driving startup, clicks and fragment changes
//! - [`ContentLoader`]: fetch, TOC splice, metadata, breadcrumbs
//! - [`Fragment`]: `key` / `key:anchor` address format
//! - [`PageView`]: everything the host renders for one page
//!
//! # Example
//!
//! ```
//! use waymark_content::MockContent;
//! use waymark_nav::NavTree;
//! use waymark_router::{Outcome, Router, SiteInfo};
//! use waymark_state::{MemorySession, SessionState};
//!
//! let tree = NavTree::parse(
//!     r##"<nav id="sidebar"><ul class="nav-level-1">
//!         <li><a data-content="home" href="#">Home</a></li>
//!     </ul></nav>"##,
//! );
//! let source = MockContent::new().with_page("home", "<h1>Home</h1>");
//! let session = SessionState::new(Box::new(MemorySession::new()));
//! let site = SiteInfo {
//!     title: "Docs".to_owned(),
//!     base_url: "http://docs.test/".to_owned(),
//! };
//!
//! let mut router = Router::new(tree, Box::new(source), session, site);
//! let Outcome::Loaded(view) = router.start(None) else {
//!     panic!("expected a loaded page");
//! };
//! assert_eq!(view.key, "home");
//! ```

mod fragment;
mod loader;
mod meta;
mod router;

pub use fragment::Fragment;
pub use loader::{ContentLoader, Outcome, PageView};
pub use meta::{PageMeta, SiteInfo};
pub use router::{Router, RouterState};
