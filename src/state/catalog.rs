//! Catalog state and transitions.
//!
//! `CatalogState` is the root state type: the page cache, the two page
//! pointers, the ambient sort configuration and the favorites set. All
//! transitions go through [`CatalogState::apply`], a pure function of the
//! command - no I/O happens here.

use crate::model::{ItemId, LoadStatus, PageIndex, PageState, SortKey};
use crate::state::{CatalogCmd, Effect};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Root catalog state. Pure data, no side effects.
///
/// # State machine
///
/// Two pointers drive the view:
///
/// - `current_page` - the page the view shows; only ever moved to a page
///   whose cache entry is `Succeeded`.
/// - `requested_page` - the most recently requested page, set when a fetch
///   is issued and cleared when that fetch settles successfully *and* is
///   still the latest request.
///
/// # Latest-request-wins
///
/// `requested_page` is a single shared pointer overwritten by every new
/// request. A fetch completion promotes `current_page` only if its
/// captured page index still equals the live pointer; an earlier, slower
/// fetch resolving after a newer one updates its own cache slot but never
/// steals the view. Superseded fetches are not cancelled - there is no
/// cancellation primitive - their results are simply never adopted.
///
/// # Sparse cache
///
/// `pages` holds only the indices that were ever requested; absence of an
/// entry is equivalent to an `Idle` page with no items, synthesized on
/// demand by the selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    /// Page the view currently shows.
    current_page: PageIndex,
    /// Most recently requested page, when a fetch has not settled yet.
    requested_page: Option<PageIndex>,
    /// Ambient sort configuration (the most recently requested one).
    sort: SortKey,
    /// Catalog page count as reported by the last successful payload.
    total_pages: u32,
    /// Sparse page cache.
    pages: BTreeMap<PageIndex, PageState>,
    /// User-curated favorite item ids, independent of pagination.
    favorites: BTreeSet<ItemId>,
}

impl CatalogState {
    /// Create the initial state.
    ///
    /// `favorites` is the set rehydrated from persistent storage (empty on
    /// absence or corruption - see [`storage::decode_favorites`]).
    ///
    /// [`storage::decode_favorites`]: crate::storage::decode_favorites
    pub fn new(sort: SortKey, favorites: BTreeSet<ItemId>) -> Self {
        Self {
            current_page: PageIndex::FIRST,
            requested_page: None,
            sort,
            total_pages: 0,
            pages: BTreeMap::new(),
            favorites,
        }
    }

    /// Apply one command, returning the effects the shell must execute.
    ///
    /// This is the only mutation path. The match is exhaustive, so adding
    /// a command without deciding its transition fails to compile.
    pub fn apply(&mut self, cmd: CatalogCmd) -> Vec<Effect> {
        match cmd {
            CatalogCmd::RequestPage { page, sort } => self.request_page(page, sort),

            CatalogCmd::FetchPending { page, sort } => {
                // Total replacement: an issued fetch discards whatever the
                // slot held, including a previous failure.
                self.pages.insert(page, PageState::loading(sort));
                self.requested_page = Some(page);
                Vec::new()
            }

            CatalogCmd::FetchSucceeded {
                page,
                items,
                total_pages,
            } => {
                let sort = self.sort;
                let entry = self
                    .pages
                    .entry(page)
                    .or_insert_with(|| PageState::loading(sort));
                entry.items = items.into_iter().collect();
                entry.status = LoadStatus::Succeeded;
                entry.error = None;
                self.total_pages = total_pages;

                if self.requested_page == Some(page) {
                    debug!(%page, "fetch settled, promoting to current page");
                    self.current_page = page;
                    self.requested_page = None;
                } else {
                    // Superseded: the slot is cached for reuse but the
                    // view stays where the latest request put it.
                    debug!(%page, "fetch settled after supersession, not promoting");
                }
                Vec::new()
            }

            CatalogCmd::FetchFailed { page, message } => {
                let sort = self.sort;
                let entry = self
                    .pages
                    .entry(page)
                    .or_insert_with(|| PageState::loading(sort));
                entry.status = LoadStatus::Failed;
                entry.error = Some(message);
                Vec::new()
            }

            CatalogCmd::SetCurrentPage(page) => {
                self.current_page = page;
                self.requested_page = None;
                Vec::new()
            }

            CatalogCmd::SetSortBy(by) => {
                self.sort.by = by;
                Vec::new()
            }

            CatalogCmd::SetSortOrder(order) => {
                self.sort.order = order;
                Vec::new()
            }

            CatalogCmd::SetFavorite { id, flag } => {
                let mutated = if flag {
                    self.favorites.insert(id)
                } else {
                    self.favorites.remove(&id)
                };
                if mutated {
                    vec![Effect::PersistFavorites]
                } else {
                    Vec::new()
                }
            }

            CatalogCmd::ClearFavorites => {
                self.favorites.clear();
                Vec::new()
            }
        }
    }

    /// The request-orchestration decision: reuse, promote, fetch, or wait.
    ///
    /// Evaluated as one match on the cached status, so at most one branch
    /// fires per invocation - a single request can never issue two fetches.
    fn request_page(&mut self, page: PageIndex, sort: SortKey) -> Vec<Effect> {
        // The requested configuration becomes the ambient one; fresh Idle
        // placeholders and failure slots are tagged with it from here on.
        self.sort = sort;

        match self.pages.get(&page) {
            Some(existing) if existing.status == LoadStatus::Succeeded => {
                if existing.sort == sort {
                    debug!(%page, %sort, "cache hit, adopting cached page");
                    self.apply(CatalogCmd::SetCurrentPage(page))
                } else {
                    debug!(
                        %page,
                        requested = %sort,
                        cached = %existing.sort,
                        "cached page has stale sort tag, refetching"
                    );
                    self.start_fetch(page, sort)
                }
            }
            Some(existing) if existing.status == LoadStatus::Loading => {
                // In flight: the pending fetch settles on its own.
                debug!(%page, "fetch already in flight, waiting");
                Vec::new()
            }
            _ => {
                // Absent, Idle or Failed.
                debug!(%page, %sort, "cache miss, fetching");
                self.start_fetch(page, sort)
            }
        }
    }

    fn start_fetch(&mut self, page: PageIndex, sort: SortKey) -> Vec<Effect> {
        let mut effects = self.apply(CatalogCmd::FetchPending { page, sort });
        effects.push(Effect::Fetch { page, sort });
        effects
    }

    /// Page the view currently shows.
    pub fn current_page_index(&self) -> PageIndex {
        self.current_page
    }

    /// Most recently requested page, when its fetch has not settled.
    pub fn requested_page_index(&self) -> Option<PageIndex> {
        self.requested_page
    }

    /// Ambient sort configuration.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Catalog page count from the last successful payload (0 before any).
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Cache entry for a page, if one exists.
    pub fn page(&self, page: PageIndex) -> Option<&PageState> {
        self.pages.get(&page)
    }

    /// The favorites set.
    pub fn favorites(&self) -> &BTreeSet<ItemId> {
        &self.favorites
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(SortKey::default(), BTreeSet::new())
    }
}
