//! Per-page cache entry: load status, items, sort tag, error.

use crate::model::{ItemTable, SortKey};

/// Lifecycle status of one cached page.
///
/// Transitions are driven exclusively by the catalog state machine:
///
/// - `Idle → Loading` when a fetch is issued
/// - `Loading → Succeeded` on fetch completion
/// - `Loading → Failed` on fetch failure
/// - `Failed → Loading` when the page is re-requested
/// - `Succeeded → Loading` when the cached sort tag no longer matches
///
/// A page stuck in `Loading` stays there: re-requests of an in-flight page
/// are no-ops, and no timeout exists at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    /// Never fetched (or a synthesized placeholder for an absent entry).
    Idle,
    /// A fetch for this page is in flight.
    Loading,
    /// Items are populated and valid for the recorded sort tag.
    Succeeded,
    /// The last fetch failed; `error` carries the message.
    Failed,
}

/// One entry of the page cache.
///
/// # Invariants
///
/// - A `Succeeded` entry is valid only for the `sort` it records; callers
///   wanting a different sort must treat it as stale.
/// - On success the items fully replace any prior contents for the page
///   index - there is no accumulation across refetches.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    /// Lifecycle status.
    pub status: LoadStatus,
    /// Items for this page, empty unless `Succeeded`.
    pub items: ItemTable,
    /// Sort configuration the entry was created under (the cache tag).
    pub sort: SortKey,
    /// Failure message from the last fetch, when `Failed`.
    pub error: Option<String>,
}

impl PageState {
    /// Fresh never-fetched entry tagged with the given sort.
    pub fn idle(sort: SortKey) -> Self {
        Self {
            status: LoadStatus::Idle,
            items: ItemTable::new(),
            sort,
            error: None,
        }
    }

    /// Fresh in-flight entry tagged with the given sort.
    ///
    /// Issued fetches always start from an empty item set; the previous
    /// contents of the slot (if any) are discarded wholesale.
    pub fn loading(sort: SortKey) -> Self {
        Self {
            status: LoadStatus::Loading,
            items: ItemTable::new(),
            sort,
            error: None,
        }
    }

    /// Whether this entry can satisfy a request for `sort` without a fetch.
    pub fn fresh_for(&self, sort: SortKey) -> bool {
        self.status == LoadStatus::Succeeded && self.sort == sort
    }
}
