//! JSON-lines persistence for the identity engine.
//!
//! One file per logical table, written to a temporary sibling path and
//! atomically renamed over the previous file, so a crashed run never leaves
//! a half-written store visible. Missing files load as empty tables.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonlStore;
