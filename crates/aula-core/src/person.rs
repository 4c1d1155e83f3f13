//! Person — the canonical individual behind noisy speaker strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// A canonical person record. Created once per distinct real-world
/// individual at registry build time; immutable except for enrichment
/// fields, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:     PersonId,
  pub given_name:    String,
  pub family_name:   String,
  /// Unique, derived from the name pair, ≤60 chars.
  pub slug:          String,
  pub date_of_birth: Option<NaiveDate>,
  pub sex:           Option<String>,
  /// External knowledge-base identifier (e.g. a Wikidata QID).
  pub wikidata_qid:  Option<String>,
  pub created_at:    DateTime<Utc>,
}
