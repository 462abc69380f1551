//! Data-source failure taxonomy.
//!
//! Every variant here is recoverable: fetch failures never cross the
//! catalog's public operations as errors. The orchestrator converts them
//! into observable state - `PageState.error` plus a `Failed` status - and
//! the surrounding UI decides how to surface them.

use thiserror::Error;

/// Failure reported by the external data source for one page fetch.
///
/// The `Display` output is the descriptive message stored verbatim into
/// `PageState.error`, so each variant carries enough context to be shown
/// to a user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream responded with a non-success status.
    ///
    /// `code` and `message` are the upstream's own error fields when the
    /// body carried them, mirrored into the message the way the original
    /// client reported them.
    #[error("failed to load page, because of [{http_status}] {code} {message}")]
    Upstream {
        /// HTTP status of the response.
        http_status: u16,
        /// Upstream-specific error code from the response body.
        code: u32,
        /// Human-readable upstream message.
        message: String,
    },

    /// The response body did not match the expected payload shape.
    #[error("failed to decode page payload: {0}")]
    Decode(String),

    /// The request never produced a response (connection refused, DNS,
    /// timeout at the transport layer, ...).
    #[error("transport error: {0}")]
    Transport(String),
}
