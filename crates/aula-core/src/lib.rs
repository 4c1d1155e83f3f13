//! Core types for the Aula identity engine.
//!
//! This crate is deliberately free of I/O and storage dependencies;
//! all other crates in the workspace depend on it.

pub mod alias;
pub mod error;
pub mod id;
pub mod inbox;
pub mod normalize;
pub mod party;
pub mod person;
pub mod slug;
pub mod xref;

pub use error::{Error, Result};
pub use id::{PartyId, PersonId};
