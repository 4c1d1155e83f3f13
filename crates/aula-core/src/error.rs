//! Error types for `aula-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed person id (expected P + at least 6 digits): {0:?}")]
  MalformedPersonId(String),

  #[error("malformed party id (expected PARTY + at least 3 digits): {0:?}")]
  MalformedPartyId(String),

  #[error("confidence out of range [0,1]: {0}")]
  ConfidenceOutOfRange(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
