//! Router state machine.
//!
//! Owns the navigation tree, the session state, and the loader; drives
//! the `Idle -> Resolving -> Loading -> Active` lifecycle. All loads run
//! synchronously to completion, so re-entrancy from `Active` is just
//! another `Loading` transition.

use waymark_content::ContentSource;
use waymark_nav::NavTree;
use waymark_state::SessionState;

use crate::fragment::Fragment;
use crate::loader::{ContentLoader, Outcome};
use crate::meta::SiteInfo;

/// Lifecycle of the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterState {
    /// Not yet started.
    Idle,
    /// Determining the initial page.
    Resolving,
    /// A load is in flight.
    Loading,
    /// A page is displayed, breadcrumb and TOC wired.
    Active,
}

/// Content router: one instance owns the current-page pointer.
pub struct Router {
    tree: NavTree,
    session: SessionState,
    loader: ContentLoader,
    state: RouterState,
    /// Fragment the address bar should show, sans `#`.
    address: Option<String>,
}

impl Router {
    #[must_use]
    pub fn new(
        tree: NavTree,
        source: Box<dyn ContentSource>,
        session: SessionState,
        site: SiteInfo,
    ) -> Self {
        Self {
            tree,
            session,
            loader: ContentLoader::new(source, site),
            state: RouterState::Idle,
            address: None,
        }
    }

    /// Resolve and load the initial page.
    ///
    /// Priority: address fragment, then the persisted `currentPage`, then
    /// the first top-level navigation item.
    pub fn start(&mut self, fragment: Option<&str>) -> Outcome {
        self.state = RouterState::Resolving;
        let target = fragment
            .and_then(Fragment::parse)
            .or_else(|| self.session.current_page().map(Fragment::page))
            .unwrap_or_else(|| Fragment::page(self.tree.first_top_level()));
        tracing::debug!(key = %target.key, "initial page resolved");
        self.run_load(&target, true, true)
    }

    /// Navigate from a link or menu click.
    ///
    /// A parent menu entry is expanded in the session before loading, so
    /// the sidebar opens the section the reader just entered.
    pub fn navigate(&mut self, key: &str) -> Outcome {
        if self.tree.get(key).is_some_and(|node| node.has_children) {
            self.session.expand_menu_item(key);
        }
        self.run_load(&Fragment::page(key), true, true)
    }

    /// Follow an anchor link of the form `key:anchorId`.
    ///
    /// A link into the current page skips the fetch but still surfaces
    /// the scroll target through the outcome.
    pub fn follow_link(&mut self, fragment: &str) -> Outcome {
        match Fragment::parse(fragment) {
            Some(target) => self.run_load(&target, true, true),
            None => {
                tracing::warn!(fragment, "unparseable link fragment ignored");
                Outcome::AlreadyCurrent {
                    scroll_target: None,
                }
            }
        }
    }

    /// React to an external fragment change (browser back/forward).
    ///
    /// The address bar already shows the new fragment, so it must not be
    /// pushed again.
    pub fn on_fragment_change(&mut self, fragment: &str) -> Outcome {
        match Fragment::parse(fragment) {
            Some(target) => self.run_load(&target, true, false),
            None => self.start(None),
        }
    }

    fn run_load(&mut self, target: &Fragment, persist: bool, update_address: bool) -> Outcome {
        self.state = RouterState::Loading;
        let outcome = self.loader.load(
            &target.key,
            target.anchor.clone(),
            &self.tree,
            &self.session,
            persist,
        );
        match &outcome {
            Outcome::Loaded(_) | Outcome::AlreadyCurrent { .. } => {
                self.state = RouterState::Active;
                if update_address && !matches!(outcome, Outcome::AlreadyCurrent { .. }) {
                    self.address = Some(target.to_string());
                }
            }
            Outcome::Failed { .. } => {
                self.state = RouterState::Idle;
                self.address = None;
            }
        }
        outcome
    }

    #[must_use]
    pub fn state(&self) -> RouterState {
        self.state
    }

    /// The currently active content key.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.loader.current()
    }

    /// Fragment the address bar should show, without the leading `#`.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The navigation tree the router was built with.
    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Session state, for hosts wiring collapse toggles.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }
}
