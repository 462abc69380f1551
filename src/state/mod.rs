//! Catalog state machine: root state, commands, effects.
//!
//! The pure core of the crate. State transitions are total functions from
//! `(state, command)` to `(state, effects)`; the impure shell in
//! [`runtime`](crate::runtime) interprets the effects.

pub mod catalog;
pub mod command;

pub use catalog::CatalogState;
pub use command::{CatalogCmd, Effect};
