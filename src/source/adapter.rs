//! Wire-shape adapter for the upstream catalog API.
//!
//! Maps raw response bodies (`results`, `total_pages`; item fields
//! `poster_path`, `vote_average`, `release_date`, ...) into the internal
//! [`Item`] shape. The mapping lives here, at the data-source boundary -
//! the core never sees wire field names.

use crate::model::{Item, ItemId, SourceError};
use crate::source::PagePayload;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Base URL posters are served from, at the width the UI renders.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w300";

#[derive(Debug, Deserialize)]
struct RawPage {
    results: Vec<RawItem>,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    #[serde(default)]
    poster_path: Option<String>,
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    release_date: String,
}

/// Upstream error body shape; both fields are optional in practice.
#[derive(Debug, Deserialize, Default)]
struct RawErrorBody {
    #[serde(default)]
    status_code: u32,
    #[serde(default)]
    status_message: String,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Item {
            id: ItemId::new(raw.id),
            image_url: raw
                .poster_path
                .map(|path| format!("{IMAGE_BASE_URL}{path}"))
                .unwrap_or_default(),
            title: raw.title,
            overview: raw.overview,
            rating: raw.vote_average,
            year: parse_year(&raw.release_date),
        }
    }
}

fn parse_year(release_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Decode a successful response body into a page payload.
pub fn decode_page(body: &str) -> Result<PagePayload, SourceError> {
    let raw: RawPage =
        serde_json::from_str(body).map_err(|err| SourceError::Decode(err.to_string()))?;
    Ok(PagePayload {
        items: raw.results.into_iter().map(Item::from).collect(),
        total_pages: raw.total_pages,
    })
}

/// Build the descriptive failure for a non-success response.
///
/// The body is parsed leniently: an unreadable error body still produces a
/// message carrying the HTTP status.
pub fn decode_error(http_status: u16, body: &str) -> SourceError {
    let raw: RawErrorBody = serde_json::from_str(body).unwrap_or_default();
    SourceError::Upstream {
        http_status,
        code: raw.status_code,
        message: if raw.status_message.is_empty() {
            "unknown upstream error".to_string()
        } else {
            raw.status_message
        },
    }
}
