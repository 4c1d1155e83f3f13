//! Unmatched inbox — the curation queue for unresolved speaker names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An unresolved normalized name, deduplicated per `norm_name`.
///
/// First unresolved match creates the entry; subsequent matches of the same
/// normalized name bump `last_seen` and append the sample text if it is new.
/// Never duplicated, never an error — this is the expected soft-failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxEntry {
  /// First-seen literal, kept verbatim for the curator.
  pub raw_name:     String,
  pub norm_name:    String,
  /// Set semantics: a given text appears at most once.
  pub sample_texts: Vec<String>,
  pub source_url:   String,
  pub first_seen:   DateTime<Utc>,
  pub last_seen:    DateTime<Utc>,
}
