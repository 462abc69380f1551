//! Pure selectors over [`CatalogState`] - the view layer.
//!
//! Everything here is derived, read-only state: selectors borrow from the
//! catalog where an entry exists and synthesize a fresh `Idle` page where
//! one does not (the cache is sparse). No function in this module has
//! mutation rights; the UI reads state transitions through these and never
//! touches the cache directly.

use crate::model::{Item, ItemId, LoadStatus, PageIndex, PageState};
use crate::state::CatalogState;
use std::borrow::Cow;

/// The page the view currently shows, or a fresh `Idle` page.
pub fn current_page(state: &CatalogState) -> Cow<'_, PageState> {
    page_or_idle(state, Some(state.current_page_index()))
}

/// The most recently requested page, or a fresh `Idle` page when no
/// request is outstanding.
pub fn requested_page(state: &CatalogState) -> Cow<'_, PageState> {
    page_or_idle(state, state.requested_page_index())
}

fn page_or_idle(state: &CatalogState, index: Option<PageIndex>) -> Cow<'_, PageState> {
    index
        .and_then(|page| state.page(page))
        .map(Cow::Borrowed)
        .unwrap_or_else(|| Cow::Owned(PageState::idle(state.sort())))
}

/// Load status of the current page.
pub fn current_page_status(state: &CatalogState) -> LoadStatus {
    current_page(state).status
}

/// Load status of the requested page (`Idle` when none is outstanding).
pub fn requested_page_status(state: &CatalogState) -> LoadStatus {
    requested_page(state).status
}

/// Failure message of the requested page, only while it is `Failed`.
pub fn requested_page_error(state: &CatalogState) -> Option<&str> {
    state
        .requested_page_index()
        .and_then(|page| state.page(page))
        .filter(|entry| entry.status == LoadStatus::Failed)
        .and_then(|entry| entry.error.as_deref())
}

/// Item ids of the current page, in data-source order.
///
/// Empty unless the current page is `Succeeded`; a loading or failed page
/// exposes no items.
pub fn item_ids(state: &CatalogState) -> &[ItemId] {
    succeeded_current(state)
        .map(|entry| entry.items.ids())
        .unwrap_or(&[])
}

/// Item of the current page by id, only while the page is `Succeeded`.
pub fn item_by_id(state: &CatalogState, id: ItemId) -> Option<&Item> {
    succeeded_current(state).and_then(|entry| entry.items.get(id))
}

fn succeeded_current(state: &CatalogState) -> Option<&PageState> {
    state
        .page(state.current_page_index())
        .filter(|entry| entry.status == LoadStatus::Succeeded)
}

/// Whether an item is in the favorites set.
pub fn favorite_flag(state: &CatalogState, id: ItemId) -> bool {
    state.favorites().contains(&id)
}
