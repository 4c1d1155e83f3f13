//! Institutional roles — ministers, deputies, committee seats.

use aula_core::PersonId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dimension::TemporalFact;

/// One interval of a person holding an institutional role.
///
/// Natural key: `(person_id, role_type, org)` — the same person can hold a
/// ministerial role and a parliamentary seat concurrently, each versioned
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleFact {
  pub person_id:  PersonId,
  /// Coarse class, e.g. "minister" or "deputy".
  pub role_type:  String,
  pub org:        String,
  pub title:      Option<String>,
  /// Seniority rank within the org, 1 = highest.
  pub grade:      Option<u8>,
  pub valid_from: NaiveDate,
  pub valid_to:   Option<NaiveDate>,
  pub source_url: String,
}

impl TemporalFact for RoleFact {
  type Key = (PersonId, String, String);

  fn subject_id(&self) -> &PersonId { &self.person_id }

  fn natural_key(&self) -> Self::Key {
    (self.person_id.clone(), self.role_type.clone(), self.org.clone())
  }

  fn valid_from(&self) -> NaiveDate { self.valid_from }

  fn valid_to(&self) -> Option<NaiveDate> { self.valid_to }

  fn close(&mut self, on: NaiveDate) { self.valid_to = Some(on); }
}
