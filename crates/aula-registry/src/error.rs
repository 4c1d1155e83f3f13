//! Error types for `aula-registry`.

use std::path::PathBuf;

use aula_core::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An active alias with identical normalized text already points at a
  /// different person. Enforced at write time so the matcher's confidence
  /// tie-break never has to choose between two persons.
  #[error(
    "alias {alias:?} is already active for {existing}, refusing to attach \
     it to {attempted}"
  )]
  DuplicateActiveAlias {
    alias:     String,
    existing:  PersonId,
    attempted: PersonId,
  },

  #[error("failed to read seed file {path}: {source}")]
  SeedRead {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },

  #[error(transparent)]
  Core(#[from] aula_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
