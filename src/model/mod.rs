//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors where
//! validation applies; nothing here performs I/O.

pub mod error;
pub mod identifiers;
pub mod item;
pub mod page;
pub mod sort;

// Re-export for convenience
pub use error::SourceError;
pub use identifiers::{InvalidPageIndex, ItemId, PageIndex};
pub use item::{Item, ItemTable};
pub use page::{LoadStatus, PageState};
pub use sort::{InvalidSort, SortBy, SortKey, SortOrder};
