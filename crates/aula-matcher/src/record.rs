//! Intervention records at the ingest boundary.
//!
//! Upstream adapters hand over raw records; enrichment adds exactly three
//! identity fields and leaves everything else untouched. Unknown upstream
//! fields ride along in a flattened map, so adapter-specific columns
//! survive the round-trip without this crate knowing about them.

use aula_core::{PartyId, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw intervention record from an ingest adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIntervention {
  /// Free-text speaker name, as printed by the source.
  pub speaker:    String,
  pub source_url: String,
  /// Utterance text; only the first 200 chars are used as inbox sample.
  #[serde(default)]
  pub text:       String,
  /// The sitting date, when the adapter provides one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date:       Option<NaiveDate>,
  /// Adapter-specific fields, preserved verbatim.
  #[serde(flatten)]
  pub extra:      serde_json::Map<String, serde_json::Value>,
}

/// A raw record plus the three identity fields added by enrichment.
/// `None` values serialize as explicit nulls — downstream consumers rely
/// on the fields being present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedIntervention {
  #[serde(flatten)]
  pub record: RawIntervention,

  pub person_id:           Option<PersonId>,
  pub party_id_at_ts:      Option<PartyId>,
  pub group_id_aula_at_ts: Option<String>,
}
