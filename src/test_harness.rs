//! Test doubles for the data source and persistence boundaries.
//!
//! Used by unit and in-crate acceptance tests to drive the runtime without
//! a network or a filesystem: scripted per-page fetch results, a gate that
//! holds fetches open until the test releases them, and a store that fails
//! on demand.

use crate::model::{Item, ItemId, PageIndex, SortKey, SourceError};
use crate::source::{DataSource, PagePayload};
use crate::storage::{KeyValueStore, StorageError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

/// Shorthand for a 1-based page index in tests.
pub fn page(n: u32) -> PageIndex {
    PageIndex::new(n).expect("positive page index")
}

/// Minimal item with the given id.
pub fn item(id: u64) -> Item {
    Item {
        id: ItemId::new(id),
        image_url: format!("https://img.example/{id}.jpg"),
        title: format!("item {id}"),
        overview: String::new(),
        rating: 7.0,
        year: Some(2000),
    }
}

/// Payload of minimal items with the given ids.
pub fn payload(ids: &[u64], total_pages: u32) -> PagePayload {
    PagePayload {
        items: ids.iter().copied().map(item).collect(),
        total_pages,
    }
}

/// Data source returning pre-scripted results per page.
///
/// Each scripted result is consumed once, in order; a fetch for a page
/// with no remaining script entries fails with a transport error. Every
/// call is recorded for assertion.
pub struct ScriptedSource {
    calls: Mutex<Vec<(PageIndex, SortKey)>>,
    script: Mutex<HashMap<PageIndex, VecDeque<Result<PagePayload, SourceError>>>>,
}

impl ScriptedSource {
    /// Empty script.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(HashMap::new()),
        }
    }

    /// Queue the next result for a page.
    pub fn script(&self, page: PageIndex, result: Result<PagePayload, SourceError>) {
        self.script
            .lock()
            .expect("script lock")
            .entry(page)
            .or_default()
            .push_back(result);
    }

    /// Every `(page, sort)` pair fetched so far.
    pub fn calls(&self) -> Vec<(PageIndex, SortKey)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl DataSource for ScriptedSource {
    fn fetch(&self, page: PageIndex, sort: SortKey) -> Result<PagePayload, SourceError> {
        self.calls.lock().expect("calls lock").push((page, sort));
        self.script
            .lock()
            .expect("script lock")
            .get_mut(&page)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(SourceError::Transport(format!("no scripted response for page {page}"))))
    }
}

/// Data source whose fetches block until the test releases them.
///
/// Each expected fetch is registered up front with [`gate`]; the returned
/// sender releases that fetch with its result. Lets tests settle overlapping
/// fetches in a chosen order.
///
/// [`gate`]: GatedSource::gate
pub struct GatedSource {
    gates: Mutex<HashMap<PageIndex, VecDeque<mpsc::Receiver<Result<PagePayload, SourceError>>>>>,
}

impl GatedSource {
    /// No gates registered.
    pub fn new() -> Self {
        Self {
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Register a gate for the next fetch of `page`.
    pub fn gate(&self, page: PageIndex) -> mpsc::Sender<Result<PagePayload, SourceError>> {
        let (tx, rx) = mpsc::channel();
        self.gates
            .lock()
            .expect("gates lock")
            .entry(page)
            .or_default()
            .push_back(rx);
        tx
    }
}

impl DataSource for GatedSource {
    fn fetch(&self, page: PageIndex, _sort: SortKey) -> Result<PagePayload, SourceError> {
        let gate = self
            .gates
            .lock()
            .expect("gates lock")
            .get_mut(&page)
            .and_then(VecDeque::pop_front);
        match gate {
            // Held open until the test sends; a dropped sender reads as a
            // transport failure rather than a hang.
            Some(rx) => rx
                .recv()
                .unwrap_or_else(|_| Err(SourceError::Transport("gate dropped".to_string()))),
            None => Err(SourceError::Transport(format!("ungated fetch for page {page}"))),
        }
    }
}

/// Store that records writes and fails the next N of them on demand.
///
/// The written map is shared, so tests keep a handle to it after moving
/// the store into the runtime.
pub struct FlakyStore {
    written: Arc<Mutex<HashMap<String, String>>>,
    fail_remaining: Arc<AtomicUsize>,
}

impl FlakyStore {
    /// Store that succeeds until told otherwise.
    pub fn new() -> Self {
        Self {
            written: Arc::new(Mutex::new(HashMap::new())),
            fail_remaining: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to everything successfully written.
    pub fn written(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.written)
    }

    /// Make the next `n` writes fail.
    pub fn fail_next_writes(&self, n: usize) {
        self.fail_remaining.store(n, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.written.lock().expect("written lock").get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.written
            .lock()
            .expect("written lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
