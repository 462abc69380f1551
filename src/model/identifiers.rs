//! Core identifier newtypes with smart constructors.
//!
//! Raw constructors for validated types are never exported - use smart
//! constructors only.

use std::fmt;
use thiserror::Error;

/// Unique identifier for a catalog item.
///
/// Item ids come from the upstream data source and are opaque integers;
/// they are the identity used by the entity store and the favorites set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw upstream id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value, as persisted in the favorites array.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Error returned when constructing a [`PageIndex`] from zero.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("page index must be 1-based (got 0)")]
pub struct InvalidPageIndex;

/// 1-based index of a catalog page.
///
/// Pages are identified by their upstream index, which starts at 1. The
/// smart constructor rejects 0 so a `PageIndex` is always a valid request
/// parameter. NEVER export the raw constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageIndex(u32);

impl PageIndex {
    /// The first catalog page.
    pub const FIRST: PageIndex = PageIndex(1);

    /// Smart constructor: validates the index is 1-based.
    pub fn new(raw: u32) -> Result<Self, InvalidPageIndex> {
        if raw == 0 {
            Err(InvalidPageIndex)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw 1-based index, for request parameters and display.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
