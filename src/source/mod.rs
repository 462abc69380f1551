//! External data-source contract.
//!
//! The HTTP transport is an external collaborator: this module owns only
//! the interface the orchestrator fetches through and the adapter that
//! maps the upstream wire shape into domain [`Item`]s. An implementation
//! wraps whatever client the host application uses.

use crate::model::{Item, PageIndex, SortKey, SourceError};

pub mod adapter;

pub use adapter::{decode_error, decode_page};

/// One page worth of fetched catalog data.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePayload {
    /// Items in upstream order.
    pub items: Vec<Item>,
    /// Total page count reported by the upstream.
    pub total_pages: u32,
}

/// The external data source the orchestrator fetches pages from.
///
/// `fetch` must return `Err` with a descriptive [`SourceError`] when the
/// upstream responds with a non-success status. Implementations are called
/// from worker threads, hence `Send + Sync`.
pub trait DataSource: Send + Sync {
    /// Fetch one page under a sort configuration.
    fn fetch(&self, page: PageIndex, sort: SortKey) -> Result<PagePayload, SourceError>;
}
