//! Sort configuration types.
//!
//! A cached page is only valid for the sort configuration it was fetched
//! under, so the `(SortBy, SortOrder)` pair acts as a cache tag as well as
//! a request parameter.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unrecognized sort field or order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized sort value '{0}'")]
pub struct InvalidSort(pub String);

/// Field the catalog is ordered by.
///
/// Variants mirror the upstream discover endpoint's sort fields; `as_str`
/// produces the exact wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortBy {
    /// Upstream popularity score (the default).
    Popularity,
    /// Release date.
    ReleaseDate,
    /// Average user rating.
    VoteAverage,
    /// Original title, lexicographic.
    Title,
}

impl SortBy {
    /// Wire spelling of the sort field.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Popularity => "popularity",
            SortBy::ReleaseDate => "release_date",
            SortBy::VoteAverage => "vote_average",
            SortBy::Title => "original_title",
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Popularity
    }
}

impl FromStr for SortBy {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortBy::Popularity),
            "release_date" => Ok(SortBy::ReleaseDate),
            "vote_average" => Ok(SortBy::VoteAverage),
            "original_title" => Ok(SortBy::Title),
            other => Err(InvalidSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SortBy {
    type Error = InvalidSort;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortBy> for String {
    fn from(v: SortBy) -> Self {
        v.as_str().to_string()
    }
}

/// Direction of the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending (the default).
    Desc,
}

impl SortOrder {
    /// Wire spelling of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl FromStr for SortOrder {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(InvalidSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SortOrder {
    type Error = InvalidSort;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortOrder> for String {
    fn from(v: SortOrder) -> Self {
        v.as_str().to_string()
    }
}

/// The `(field, order)` pair a page was fetched under.
///
/// Equality of the whole key decides cache validity: a `Succeeded` page
/// whose key differs from the requested one is stale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct SortKey {
    /// Field the catalog is ordered by.
    pub by: SortBy,
    /// Direction of the sort.
    pub order: SortOrder,
}

impl SortKey {
    /// Build a key from field and order.
    pub fn new(by: SortBy, order: SortOrder) -> Self {
        Self { by, order }
    }

    /// Upstream `sort_by` request parameter, e.g. `"popularity.desc"`.
    pub fn request_param(&self) -> String {
        format!("{}.{}", self.by.as_str(), self.order.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.by, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_popularity_descending() {
        let key = SortKey::default();
        assert_eq!(key.by, SortBy::Popularity);
        assert_eq!(key.order, SortOrder::Desc);
    }

    #[test]
    fn request_param_joins_with_dot() {
        let key = SortKey::new(SortBy::VoteAverage, SortOrder::Asc);
        assert_eq!(key.request_param(), "vote_average.asc");
    }

    #[test]
    fn sort_by_parses_wire_spelling() {
        assert_eq!("popularity".parse::<SortBy>(), Ok(SortBy::Popularity));
        assert_eq!("release_date".parse::<SortBy>(), Ok(SortBy::ReleaseDate));
        assert_eq!("vote_average".parse::<SortBy>(), Ok(SortBy::VoteAverage));
        assert_eq!("original_title".parse::<SortBy>(), Ok(SortBy::Title));
    }

    #[test]
    fn sort_by_rejects_unknown_field() {
        let err = "watchability".parse::<SortBy>().unwrap_err();
        assert!(err.to_string().contains("watchability"));
    }

    #[test]
    fn sort_order_parses_both_directions() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
    }

    #[test]
    fn sort_by_deserializes_from_toml_string() {
        #[derive(serde::Deserialize)]
        struct Probe {
            by: SortBy,
        }
        let probe: Probe = toml::from_str(r#"by = "release_date""#).expect("parse");
        assert_eq!(probe.by, SortBy::ReleaseDate);
    }

    #[test]
    fn keys_with_different_order_are_unequal() {
        let a = SortKey::new(SortBy::Popularity, SortOrder::Desc);
        let b = SortKey::new(SortBy::Popularity, SortOrder::Asc);
        assert_ne!(a, b, "order is part of the cache tag");
    }
}
