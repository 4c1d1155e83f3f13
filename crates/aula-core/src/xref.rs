//! Crosswalk — provenance mapping from an external source's local
//! identifier to a canonical person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// A `(person_id, source, source_id) → url` provenance record. Repeated
/// observation of the same triple updates `last_seen` instead of inserting
/// a duplicate. Not used for primary matching — the crosswalk match step is
/// a defined but unimplemented extension point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xref {
  pub person_id:  PersonId,
  /// Source system, e.g. "camera" or "senato".
  pub source:     String,
  /// The source's own identifier for the person.
  pub source_id:  String,
  pub url:        String,
  pub first_seen: DateTime<Utc>,
  pub last_seen:  DateTime<Utc>,
}
