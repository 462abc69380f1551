//! Impure shell: effect interpretation and fetch scheduling.
//!
//! [`CatalogRuntime`] owns the pure [`CatalogState`] and everything the
//! pure core must not touch: the data source, the persistence backend, and
//! the completion channel. Fetches run on spawned worker threads; their
//! results come back as commands through the channel and are applied only
//! when the owner polls, so every state mutation happens on the owning
//! thread (mutation is serialized, no locking around the state).

use crate::model::{ItemId, PageIndex, SortBy, SortKey, SortOrder};
use crate::select;
use crate::source::DataSource;
use crate::state::{CatalogCmd, CatalogState, Effect};
use crate::storage::{self, FileStore, KeyValueStore, StorageError, FAVORITES_KEY};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Catalog controller: pure state plus the effect interpreter.
///
/// # Lifecycle
///
/// Created once at startup; favorites are rehydrated from the store
/// (absence or corruption reads as empty, never an error). Thereafter the
/// owner calls the public operations and periodically [`poll`]s to apply
/// settled fetches.
///
/// # Fetch scheduling
///
/// `Effect::Fetch` spawns a worker thread per request. Workers never touch
/// state; they send a completion command carrying the page index captured
/// at dispatch. Superseded fetches are not cancelled - they run to
/// completion and their results land in their own cache slot.
///
/// [`poll`]: CatalogRuntime::poll
pub struct CatalogRuntime {
    state: CatalogState,
    source: Arc<dyn DataSource>,
    storage: Box<dyn KeyValueStore>,
    completions_tx: mpsc::Sender<CatalogCmd>,
    completions_rx: mpsc::Receiver<CatalogCmd>,
}

impl CatalogRuntime {
    /// Create a runtime over a data source and persistence backend.
    ///
    /// `sort` seeds the initial sort configuration (typically from config).
    pub fn new(
        source: Arc<dyn DataSource>,
        storage: Box<dyn KeyValueStore>,
        sort: SortKey,
    ) -> Self {
        let favorites = storage::load_favorites(storage.as_ref());
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            state: CatalogState::new(sort, favorites),
            source,
            storage,
            completions_tx,
            completions_rx,
        }
    }

    /// Create a runtime wired from resolved configuration.
    ///
    /// Favorites go to a [`FileStore`] under the configured data directory.
    pub fn from_config(config: &crate::config::Config, source: Arc<dyn DataSource>) -> Self {
        Self::new(
            source,
            Box::new(FileStore::new(&config.data_dir)),
            config.sort,
        )
    }

    /// Read access to the catalog state (selectors build on this).
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Request a page under the current sort configuration.
    pub fn request_page(&mut self, page: PageIndex) {
        let sort = self.state.sort();
        self.dispatch(CatalogCmd::RequestPage { page, sort });
    }

    /// Change the sort field; the next request fetches under it.
    pub fn set_sort_by(&mut self, by: SortBy) {
        self.dispatch(CatalogCmd::SetSortBy(by));
    }

    /// Change the sort direction; the next request fetches under it.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.dispatch(CatalogCmd::SetSortOrder(order));
    }

    /// Add or remove a favorite and persist the set.
    ///
    /// Never fails from the caller's perspective: persistence trouble is
    /// absorbed by the documented degrade policy.
    pub fn set_favorite(&mut self, id: ItemId, flag: bool) {
        self.dispatch(CatalogCmd::SetFavorite { id, flag });
    }

    /// Whether an item is currently a favorite.
    pub fn is_favorite(&self, id: ItemId) -> bool {
        select::favorite_flag(&self.state, id)
    }

    /// Apply every completion that has already settled.
    ///
    /// Returns the number of completions applied. Non-blocking.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(cmd) = self.completions_rx.try_recv() {
            self.dispatch(cmd);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for the next completion, then drain the rest.
    ///
    /// Returns the number of completions applied (0 on timeout).
    pub fn poll_deadline(&mut self, timeout: Duration) -> usize {
        match self.completions_rx.recv_timeout(timeout) {
            Ok(cmd) => {
                self.dispatch(cmd);
                1 + self.poll()
            }
            Err(_) => 0,
        }
    }

    fn dispatch(&mut self, cmd: CatalogCmd) {
        let effects = self.state.apply(cmd);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch { page, sort } => {
                let source = Arc::clone(&self.source);
                let tx = self.completions_tx.clone();
                thread::spawn(move || {
                    let completion = match source.fetch(page, sort) {
                        Ok(payload) => CatalogCmd::FetchSucceeded {
                            page,
                            items: payload.items,
                            total_pages: payload.total_pages,
                        },
                        Err(err) => CatalogCmd::FetchFailed {
                            page,
                            message: err.to_string(),
                        },
                    };
                    // A dropped receiver means the runtime is gone; the
                    // result has nowhere to land.
                    let _ = tx.send(completion);
                });
            }
            Effect::PersistFavorites => self.persist_favorites(),
        }
    }

    /// Write the favorites set back to storage.
    ///
    /// On failure the in-memory set is reset to empty and an empty array
    /// is persisted best-effort - mutation failure degrades to total data
    /// loss rather than leaving memory and disk out of sync. The failure
    /// never propagates to the caller of `set_favorite`.
    fn persist_favorites(&mut self) {
        let written = storage::encode_favorites(self.state.favorites())
            .map_err(|err| StorageError::Backend(err.to_string()))
            .and_then(|encoded| self.storage.set(FAVORITES_KEY, &encoded));

        if let Err(err) = written {
            warn!(error = %err, "failed to persist favorites, resetting set to empty");
            self.state.apply(CatalogCmd::ClearFavorites);
            if let Err(err) = self.storage.set(FAVORITES_KEY, "[]") {
                warn!(error = %err, "failed to persist emptied favorites");
            }
        }
    }
}
