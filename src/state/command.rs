//! Closed command and effect unions for the catalog state machine.
//!
//! Every mutation of [`CatalogState`](crate::state::CatalogState) is
//! expressed as a `CatalogCmd` processed by one exhaustive match, giving
//! the compiler a complete picture of the state machine. The pure
//! transition never performs I/O; instead it returns `Effect` values for
//! the shell to interpret.

use crate::model::{Item, ItemId, PageIndex, SortBy, SortKey, SortOrder};

/// A command accepted by the catalog state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCmd {
    /// User-level request for a page under a sort configuration.
    ///
    /// This is the orchestrator entry point: depending on the cached
    /// entry it adopts the cache, issues a fetch, or does nothing.
    RequestPage {
        /// Requested page.
        page: PageIndex,
        /// Requested sort configuration.
        sort: SortKey,
    },

    /// A fetch for `page` was dispatched; mark its slot in flight.
    FetchPending {
        /// Page the fetch was dispatched for.
        page: PageIndex,
        /// Sort configuration the fetch was dispatched under.
        sort: SortKey,
    },

    /// A fetch settled successfully.
    ///
    /// `page` is the index captured at dispatch time, not an ambient
    /// pointer read at completion - essential under overlapping fetches.
    FetchSucceeded {
        /// Page the fetch was dispatched for.
        page: PageIndex,
        /// Full replacement item set for the page.
        items: Vec<Item>,
        /// Catalog page count reported by the payload.
        total_pages: u32,
    },

    /// A fetch settled with a failure.
    FetchFailed {
        /// Page the fetch was dispatched for.
        page: PageIndex,
        /// Descriptive failure message for display.
        message: String,
    },

    /// Adopt a page as current and clear the requested pointer.
    SetCurrentPage(PageIndex),

    /// Change the ambient sort field.
    SetSortBy(SortBy),

    /// Change the ambient sort direction.
    SetSortOrder(SortOrder),

    /// Add or remove an item from the favorites set (idempotent).
    SetFavorite {
        /// Item to flag.
        id: ItemId,
        /// `true` to insert, `false` to remove.
        flag: bool,
    },

    /// Drop every favorite.
    ///
    /// Applied by the effect interpreter when persisting the set fails;
    /// the in-memory state then matches the empty array written back.
    ClearFavorites,
}

/// A side effect requested by a state transition.
///
/// The pure core only describes effects; the runtime executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the external data source for a page.
    Fetch {
        /// Page to fetch.
        page: PageIndex,
        /// Sort configuration to fetch under.
        sort: SortKey,
    },

    /// Serialize the post-transition favorites set to persistent storage.
    PersistFavorites,
}
