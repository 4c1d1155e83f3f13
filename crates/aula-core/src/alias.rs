//! Alias — a normalized name string mapped to a person, with a validity
//! window and a confidence score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::PersonId;

/// A normalized alias for a person.
///
/// Multiple aliases may map to the same person, but at most one *active*
/// alias (`valid_to = None`) may carry a given normalized string across the
/// whole registry. That uniqueness is enforced at write time, so the
/// highest-confidence tie-break during matching never has to choose between
/// two different persons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
  pub person_id:  PersonId,
  /// Normalized form (output of [`crate::normalize::normalize`]).
  pub alias:      String,
  pub valid_from: DateTime<Utc>,
  /// `None` means currently active.
  pub valid_to:   Option<DateTime<Utc>>,
  /// Confidence in [0, 1]; auto-derived aliases carry 1.0.
  pub confidence: f64,
}

impl Alias {
  pub fn is_active(&self) -> bool { self.valid_to.is_none() }
}
