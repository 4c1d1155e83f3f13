//! [`IdentityMatcher`] — the matching cascade and batch enrichment.

use aula_core::{
  PartyId, PersonId,
  normalize::{normalize, split},
};
use aula_registry::IdentityRegistry;
use aula_temporal::{Dimension, MembershipFact};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::record::{EnrichedIntervention, RawIntervention};

// ─── Supporting types ────────────────────────────────────────────────────────

/// A successful match: the person plus their affiliation as of the query
/// timestamp. A person with no membership covering the timestamp is still
/// a successful match — the affiliation fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
  pub person_id:           PersonId,
  pub party_id_at_ts:      Option<PartyId>,
  pub group_id_aula_at_ts: Option<String>,
}

/// Which timestamp affiliation is resolved against during `enrich`.
///
/// The membership dimension supports arbitrary point-in-time queries, so
/// both behaviors are exposed and the caller chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationBasis {
  /// Resolve against today — "who is this person affiliated with now".
  IngestTime,
  /// Resolve against each record's own sitting date, falling back to
  /// today for records without one — temporally correct attribution.
  RecordDate,
}

/// Running counters across all match calls since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
  pub matched:   u64,
  pub unmatched: u64,
}

impl MatchStats {
  pub fn total(&self) -> u64 { self.matched + self.unmatched }

  /// `matched / total`, 0 when nothing has been processed.
  pub fn match_rate(&self) -> f64 {
    match self.total() {
      0 => 0.0,
      total => self.matched as f64 / total as f64,
    }
  }
}

/// Inbox samples keep at most this many characters of the utterance.
const SAMPLE_LEN: usize = 200;

// ─── Matcher ─────────────────────────────────────────────────────────────────

/// The matcher owns a read-mostly snapshot of the registry and the
/// membership dimension for the duration of a run. The only mutation it
/// performs is inbox bookkeeping, funnelled through the registry's append
/// interface; call [`into_parts`](Self::into_parts) at the end of the run
/// to persist what accumulated.
#[derive(Debug)]
pub struct IdentityMatcher {
  registry:    IdentityRegistry,
  memberships: Dimension<MembershipFact>,
  stats:       MatchStats,
}

impl IdentityMatcher {
  pub fn new(
    registry: IdentityRegistry,
    memberships: Dimension<MembershipFact>,
  ) -> Self {
    Self { registry, memberships, stats: MatchStats::default() }
  }

  /// Match one speaker name, resolving affiliation as of `as_of`.
  ///
  /// Cascade, first success wins: active alias (highest confidence, ties
  /// by storage order) → exact `(given, family)` then swapped order →
  /// crosswalk (extension point, currently never matches) → inbox.
  ///
  /// Names that normalize to nothing return `None` without touching the
  /// counters or the inbox — there is nothing a curator could act on.
  pub fn match_speaker(
    &mut self,
    raw_name: &str,
    source_url: &str,
    sample_text: &str,
    as_of: NaiveDate,
  ) -> Option<ResolvedIdentity> {
    let norm = normalize(raw_name);
    if norm.is_empty() {
      return None;
    }

    let person_id = self
      .match_by_alias(&norm)
      .or_else(|| self.match_by_name(&norm))
      .or_else(|| self.match_by_xref(&norm, source_url));

    match person_id {
      Some(person_id) => {
        self.stats.matched += 1;
        Some(self.resolve_affiliation(person_id, as_of))
      }
      None => {
        self.stats.unmatched += 1;
        debug!(raw_name, %norm, "speaker unmatched, appending to inbox");
        let sample: String = sample_text.chars().take(SAMPLE_LEN).collect();
        self.registry.append_to_inbox(raw_name, &norm, &sample, source_url);
        None
      }
    }
  }

  fn match_by_alias(&self, norm: &str) -> Option<PersonId> {
    self.registry.active_alias(norm).map(|a| a.person_id.clone())
  }

  fn match_by_name(&self, norm: &str) -> Option<PersonId> {
    let (given, family) = split(norm);
    if given.is_empty() || family.is_empty() {
      return None;
    }
    self
      .registry
      .find_person_by_name(&given, &family)
      // Some sources print family-name-first; try the swapped order.
      .or_else(|| self.registry.find_person_by_name(&family, &given))
      .map(|p| p.person_id.clone())
  }

  /// Source-specific ID correlation — a defined extension point that
  /// intentionally never matches in this version.
  fn match_by_xref(&self, _norm: &str, _source_url: &str) -> Option<PersonId> {
    None
  }

  fn resolve_affiliation(
    &self,
    person_id: PersonId,
    as_of: NaiveDate,
  ) -> ResolvedIdentity {
    let membership = self.memberships.point_in_time(&person_id, as_of);
    ResolvedIdentity {
      party_id_at_ts:      membership.map(|m| m.party_id.clone()),
      group_id_aula_at_ts: membership.and_then(|m| m.group_id_aula.clone()),
      person_id,
    }
  }

  /// Enrich a batch of records. Individual match failures never abort the
  /// batch; unresolved records get explicit null identity fields. Inbox
  /// entries accumulate in memory — persist via [`into_parts`] once per
  /// batch, not per record.
  ///
  /// [`into_parts`]: Self::into_parts
  pub fn enrich(
    &mut self,
    records: Vec<RawIntervention>,
    basis: AffiliationBasis,
  ) -> Vec<EnrichedIntervention> {
    let today = Utc::now().date_naive();
    let total = records.len();

    let enriched: Vec<EnrichedIntervention> = records
      .into_iter()
      .map(|record| {
        let as_of = match basis {
          AffiliationBasis::IngestTime => today,
          AffiliationBasis::RecordDate => record.date.unwrap_or(today),
        };
        let resolved = self.match_speaker(
          &record.speaker,
          &record.source_url,
          &record.text,
          as_of,
        );
        match resolved {
          Some(identity) => EnrichedIntervention {
            record,
            person_id: Some(identity.person_id),
            party_id_at_ts: identity.party_id_at_ts,
            group_id_aula_at_ts: identity.group_id_aula_at_ts,
          },
          None => EnrichedIntervention {
            record,
            person_id: None,
            party_id_at_ts: None,
            group_id_aula_at_ts: None,
          },
        }
      })
      .collect();

    info!(
      total,
      matched = self.stats.matched,
      unmatched = self.stats.unmatched,
      "batch enrichment complete"
    );
    enriched
  }

  pub fn stats(&self) -> MatchStats { self.stats }

  /// Tear down into the registry (carrying any new inbox entries) and the
  /// membership dimension, for persistence at the end of the run.
  pub fn into_parts(self) -> (IdentityRegistry, Dimension<MembershipFact>) {
    (self.registry, self.memberships)
  }
}
