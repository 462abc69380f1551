//! pagecat
//!
//! Page-cache and request-orchestration core for a paginated, sortable
//! catalog with persisted favorites.
//!
//! The crate follows a Pure Core / Impure Shell architecture:
//!
//! - [`model`] and [`state`] form the pure core - the page cache, the
//!   command-driven state machine, and its invariants (cache validity per
//!   sort tag, full replacement on refetch, latest-request-wins under
//!   overlapping fetches).
//! - [`select`] computes derived, read-only view state.
//! - [`runtime`] is the shell: it interprets effects, schedules fetches
//!   against a [`source::DataSource`], and persists favorites through a
//!   [`storage::KeyValueStore`].
//!
//! Rendering, routing and the HTTP transport are external collaborators;
//! hosts implement the two boundary traits and read state through the
//! selectors.

pub mod config;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod select;
pub mod source;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
