//! The Identity Registry — authoritative owner of Person, Party, Alias,
//! Xref and Inbox lifecycles.
//!
//! The registry is an explicit in-memory store object: callers hold it,
//! mutate it through its methods, and hand its tables to a persistence
//! backend at the end of a run. Nothing here does I/O except the seed
//! loaders, which read curator CSV files.

pub mod error;
pub mod registry;
pub mod seed;

pub use error::{Error, Result};
pub use registry::{
  AddOutcome, AliasUpsert, IdentityRegistry, PartyOutcome, PersonCandidate,
  RegistryTables,
};
pub use seed::{
  PartySeed, PersonSeed, SeedReport, load_party_seeds, load_person_seeds,
};
