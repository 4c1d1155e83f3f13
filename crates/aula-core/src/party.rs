//! Party — an append-only registry of political parties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::PartyId;

/// A political party. Immutable after creation; the registry is keyed by
/// the externally supplied `party_id` and never merges duplicates beyond
/// identity-equality on that key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
  pub party_id:   PartyId,
  pub name:       String,
  pub acronym:    String,
  pub created_at: DateTime<Utc>,
}
