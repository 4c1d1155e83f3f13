//! Versioned-interval (SCD2) storage for "subject × attribute-set" facts.
//!
//! The engine is generic over the fact type: party membership and
//! institutional roles are the two concrete dimensions, but nothing here
//! knows about either. History is append-only; the only mutation ever
//! applied to an existing record is closing its validity window when a
//! newer fact for the same natural key arrives.

pub mod dimension;
pub mod membership;
pub mod role;

pub use dimension::{Dimension, TemporalFact};
pub use membership::MembershipFact;
pub use role::RoleFact;

#[cfg(test)]
mod tests;
