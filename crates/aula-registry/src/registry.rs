//! [`IdentityRegistry`] — idempotent construction and bookkeeping of
//! identity entities.

use aula_core::{
  PartyId, PersonId,
  alias::Alias,
  inbox::InboxEntry,
  normalize::normalize,
  party::Party,
  person::Person,
  slug::slug,
  xref::Xref,
};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::{Error, Result, seed::PartySeed};

// ─── Supporting types ────────────────────────────────────────────────────────

/// A person candidate from seed or enrichment input. Identifier and slug
/// are assigned by the registry, never supplied by the caller.
#[derive(Debug, Clone)]
pub struct PersonCandidate {
  pub given_name:    String,
  pub family_name:   String,
  pub date_of_birth: Option<NaiveDate>,
  pub sex:           Option<String>,
  pub wikidata_qid:  Option<String>,
}

/// Outcome of [`IdentityRegistry::add_person_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
  Created(PersonId),
  /// An equivalent record already existed; nothing was written.
  Duplicate(PersonId),
}

/// Outcome of [`IdentityRegistry::add_party_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyOutcome {
  Created(PartyId),
  Duplicate(PartyId),
}

/// Outcome of [`IdentityRegistry::upsert_alias`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasUpsert {
  Inserted,
  /// The exact active `(person, alias)` pair already existed.
  AlreadyActive,
}

/// The registry's tables in persistable form.
#[derive(Debug, Clone, Default)]
pub struct RegistryTables {
  pub persons: Vec<Person>,
  pub parties: Vec<Party>,
  pub aliases: Vec<Alias>,
  pub xrefs:   Vec<Xref>,
  pub inbox:   Vec<InboxEntry>,
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// The in-memory identity registry.
///
/// Persons and parties are append-only; aliases and xrefs are upserted;
/// the inbox is deduplicated per normalized name. Identifier sequences
/// continue from the highest suffix present in the loaded tables.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
  tables: RegistryTables,
}

impl IdentityRegistry {
  pub fn new() -> Self { Self::default() }

  /// Rehydrate from persisted tables, preserving storage order.
  pub fn from_tables(tables: RegistryTables) -> Self { Self { tables } }

  pub fn into_tables(self) -> RegistryTables { self.tables }

  // ── Persons ───────────────────────────────────────────────────────────

  /// Insert a person unless an equivalent record exists.
  ///
  /// Lookup key is `(slug, date_of_birth)`; a candidate without a date of
  /// birth matches on slug alone. On insert the next sequential id is
  /// assigned and, when the normalized full name differs from the literal
  /// lowercase `"given family"`, an active alias with confidence 1.0 is
  /// derived automatically. A derived alias already active for another
  /// person (same-named persons disambiguated by date of birth) is logged
  /// and skipped, never an error — the person itself is always committed
  /// whole. Hard rejection is reserved for curator-supplied
  /// [`upsert_alias`](Self::upsert_alias) calls.
  pub fn add_person_if_absent(
    &mut self,
    candidate: PersonCandidate,
  ) -> Result<AddOutcome> {
    let slug = slug(&candidate.given_name, &candidate.family_name);

    let existing = self.tables.persons.iter().find(|p| {
      p.slug == slug
        && (candidate.date_of_birth.is_none()
          || p.date_of_birth == candidate.date_of_birth)
    });
    if let Some(person) = existing {
      debug!(%slug, person_id = %person.person_id, "person already present");
      return Ok(AddOutcome::Duplicate(person.person_id.clone()));
    }

    let person_id = PersonId::from_seq(self.next_person_seq());
    let person = Person {
      person_id: person_id.clone(),
      given_name: candidate.given_name.clone(),
      family_name: candidate.family_name.clone(),
      slug,
      date_of_birth: candidate.date_of_birth,
      sex: candidate.sex,
      wikidata_qid: candidate.wikidata_qid,
      created_at: Utc::now(),
    };
    info!(person_id = %person.person_id, slug = %person.slug, "person added");
    self.tables.persons.push(person);

    let raw = format!("{} {}", candidate.given_name, candidate.family_name);
    let norm = normalize(&raw);
    if norm != raw.to_lowercase() {
      match self.upsert_alias(&person_id, &norm, 1.0) {
        Ok(_) => {}
        Err(Error::DuplicateActiveAlias { existing, .. }) => {
          warn!(
            %norm,
            person_id = %person_id,
            %existing,
            "derived alias already active for another person, skipping"
          );
        }
        Err(other) => return Err(other),
      }
    }

    Ok(AddOutcome::Created(person_id))
  }

  fn next_person_seq(&self) -> u32 {
    self
      .tables
      .persons
      .iter()
      .map(|p| p.person_id.seq())
      .max()
      .map_or(1, |max| max + 1)
  }

  pub fn person(&self, id: &PersonId) -> Option<&Person> {
    self.tables.persons.iter().find(|p| &p.person_id == id)
  }

  /// First person in registry order whose lowercased name pair equals
  /// `(given, family)`.
  pub fn find_person_by_name(
    &self,
    given: &str,
    family: &str,
  ) -> Option<&Person> {
    self.tables.persons.iter().find(|p| {
      p.given_name.to_lowercase() == given
        && p.family_name.to_lowercase() == family
    })
  }

  // ── Parties ───────────────────────────────────────────────────────────

  /// Append a party unless its externally supplied id is already present.
  pub fn add_party_if_absent(&mut self, seed: PartySeed) -> PartyOutcome {
    if let Some(party) =
      self.tables.parties.iter().find(|p| p.party_id == seed.party_id)
    {
      debug!(party_id = %party.party_id, "party already present");
      return PartyOutcome::Duplicate(party.party_id.clone());
    }
    let party = Party {
      party_id:   seed.party_id.clone(),
      name:       seed.name,
      acronym:    seed.acronym,
      created_at: Utc::now(),
    };
    info!(party_id = %party.party_id, acronym = %party.acronym, "party added");
    self.tables.parties.push(party);
    PartyOutcome::Created(seed.party_id)
  }

  /// Next sequential party id for parties created without an external id.
  pub fn next_party_id(&self) -> PartyId {
    let next = self
      .tables
      .parties
      .iter()
      .map(|p| p.party_id.seq())
      .max()
      .map_or(1, |max| max + 1);
    PartyId::from_seq(next)
  }

  // ── Aliases ───────────────────────────────────────────────────────────

  /// Insert an active alias unless the exact `(person, alias)` pair is
  /// already active. Rejects an alias whose text is active for a
  /// *different* person — duplicate active text across persons would make
  /// matching order-dependent.
  pub fn upsert_alias(
    &mut self,
    person_id: &PersonId,
    alias: &str,
    confidence: f64,
  ) -> Result<AliasUpsert> {
    if !(0.0..=1.0).contains(&confidence) {
      return Err(aula_core::Error::ConfidenceOutOfRange(confidence).into());
    }

    for existing in self.tables.aliases.iter().filter(|a| a.is_active()) {
      if existing.alias != alias {
        continue;
      }
      if &existing.person_id == person_id {
        return Ok(AliasUpsert::AlreadyActive);
      }
      return Err(Error::DuplicateActiveAlias {
        alias:     alias.to_string(),
        existing:  existing.person_id.clone(),
        attempted: person_id.clone(),
      });
    }

    self.tables.aliases.push(Alias {
      person_id:  person_id.clone(),
      alias:      alias.to_string(),
      valid_from: Utc::now(),
      valid_to:   None,
      confidence,
    });
    Ok(AliasUpsert::Inserted)
  }

  /// The best active alias equal to `norm`: highest confidence, ties
  /// resolved by storage order (first wins).
  pub fn active_alias(&self, norm: &str) -> Option<&Alias> {
    self
      .tables
      .aliases
      .iter()
      .filter(|a| a.is_active() && a.alias == norm)
      .reduce(|best, a| if a.confidence > best.confidence { a } else { best })
  }

  // ── Crosswalk ─────────────────────────────────────────────────────────

  /// Insert or refresh a crosswalk row. Repeated observation of the same
  /// `(person, source, source_id)` triple bumps `last_seen` only.
  pub fn upsert_xref(
    &mut self,
    person_id: &PersonId,
    source: &str,
    source_id: &str,
    url: &str,
  ) {
    let now = Utc::now();
    let existing = self.tables.xrefs.iter_mut().find(|x| {
      &x.person_id == person_id && x.source == source && x.source_id == source_id
    });
    match existing {
      Some(xref) => xref.last_seen = now,
      None => self.tables.xrefs.push(Xref {
        person_id:  person_id.clone(),
        source:     source.to_string(),
        source_id:  source_id.to_string(),
        url:        url.to_string(),
        first_seen: now,
        last_seen:  now,
      }),
    }
  }

  // ── Inbox ─────────────────────────────────────────────────────────────

  /// Record an unresolved name, deduplicated per normalized form.
  pub fn append_to_inbox(
    &mut self,
    raw_name: &str,
    norm_name: &str,
    sample_text: &str,
    source_url: &str,
  ) {
    let now = Utc::now();
    if let Some(entry) =
      self.tables.inbox.iter_mut().find(|e| e.norm_name == norm_name)
    {
      entry.last_seen = now;
      if !entry.sample_texts.iter().any(|t| t == sample_text) {
        entry.sample_texts.push(sample_text.to_string());
      }
      return;
    }

    self.tables.inbox.push(InboxEntry {
      raw_name:     raw_name.to_string(),
      norm_name:    norm_name.to_string(),
      sample_texts: vec![sample_text.to_string()],
      source_url:   source_url.to_string(),
      first_seen:   now,
      last_seen:    now,
    });
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn persons(&self) -> &[Person] { &self.tables.persons }

  pub fn parties(&self) -> &[Party] { &self.tables.parties }

  pub fn aliases(&self) -> &[Alias] { &self.tables.aliases }

  pub fn xrefs(&self) -> &[Xref] { &self.tables.xrefs }

  pub fn inbox(&self) -> &[InboxEntry] { &self.tables.inbox }
}
