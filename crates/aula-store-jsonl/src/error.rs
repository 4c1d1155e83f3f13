//! Error types for `aula-store-jsonl`.
//!
//! Storage failures are the one fatal class in the whole pipeline, so every
//! variant names the file involved — the invoking pipeline needs the path
//! to retry or alert.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read table {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write table {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to promote {tmp} over {path}: {source}")]
  Promote {
    tmp:    PathBuf,
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed row in {path} at line {line}: {source}")]
  Decode {
    path:   PathBuf,
    line:   usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode row for {path}: {source}")]
  Encode {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
