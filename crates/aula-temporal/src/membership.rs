//! Party membership — the dimension the matcher reads affiliation from.

use aula_core::{PartyId, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dimension::TemporalFact;

/// One interval of a person's membership in a party.
///
/// Natural key: `(person_id, party_id)`. The parliamentary-group identifier
/// (`group_id_aula`) is distinct from the party identifier — mixed groups
/// and name changes make the two diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipFact {
  pub person_id:     PersonId,
  pub party_id:      PartyId,
  pub group_id_aula: Option<String>,
  pub role_in_party: Option<String>,
  pub valid_from:    NaiveDate,
  pub valid_to:      Option<NaiveDate>,
  pub source_url:    String,
}

impl TemporalFact for MembershipFact {
  type Key = (PersonId, PartyId);

  fn subject_id(&self) -> &PersonId { &self.person_id }

  fn natural_key(&self) -> Self::Key {
    (self.person_id.clone(), self.party_id.clone())
  }

  fn valid_from(&self) -> NaiveDate { self.valid_from }

  fn valid_to(&self) -> Option<NaiveDate> { self.valid_to }

  fn close(&mut self, on: NaiveDate) { self.valid_to = Some(on); }
}
