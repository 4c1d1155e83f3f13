//! Curator seed input — CSV files feeding registry construction.
//!
//! Missing seed files are not an error: they log a warning and contribute
//! zero records, so a fresh checkout bootstraps an empty registry cleanly.

use std::path::Path;

use aula_core::PartyId;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
  Error, Result,
  registry::{AddOutcome, IdentityRegistry, PartyOutcome, PersonCandidate},
};

// ─── Seed rows ───────────────────────────────────────────────────────────────

/// One row of the persons seed CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonSeed {
  pub given_name:    String,
  pub family_name:   String,
  pub date_of_birth: Option<NaiveDate>,
  pub sex:           Option<String>,
  pub wikidata_qid:  Option<String>,
  /// Source system for the crosswalk row, e.g. "camera".
  pub source:        String,
  pub source_id:     String,
  pub url:           String,
}

/// One row of the parties seed CSV. The party id is externally curated and
/// stable, not assigned by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct PartySeed {
  pub party_id: PartyId,
  pub name:     String,
  pub acronym:  String,
}

// ─── Loading ─────────────────────────────────────────────────────────────────

fn load_csv<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  if !path.exists() {
    warn!(path = %path.display(), "seed file not found, loading zero records");
    return Ok(Vec::new());
  }
  let mut reader = csv::Reader::from_path(path).map_err(|source| {
    Error::SeedRead { path: path.to_path_buf(), source }
  })?;
  reader
    .deserialize()
    .map(|row| {
      row.map_err(|source| Error::SeedRead {
        path: path.to_path_buf(),
        source,
      })
    })
    .collect()
}

pub fn load_person_seeds(path: &Path) -> Result<Vec<PersonSeed>> {
  load_csv(path)
}

pub fn load_party_seeds(path: &Path) -> Result<Vec<PartySeed>> {
  load_csv(path)
}

// ─── Building ────────────────────────────────────────────────────────────────

/// Counts from one [`IdentityRegistry::build_from_seeds`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub persons_added:   usize,
  pub persons_skipped: usize,
  pub parties_added:   usize,
  pub parties_skipped: usize,
}

impl IdentityRegistry {
  /// Apply seed rows idempotently: parties first, then persons with their
  /// crosswalk rows. Running the same seeds twice adds nothing.
  pub fn build_from_seeds(
    &mut self,
    parties: Vec<PartySeed>,
    persons: Vec<PersonSeed>,
  ) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for seed in parties {
      match self.add_party_if_absent(seed) {
        PartyOutcome::Created(_) => report.parties_added += 1,
        PartyOutcome::Duplicate(_) => report.parties_skipped += 1,
      }
    }

    for seed in persons {
      let candidate = PersonCandidate {
        given_name:    seed.given_name,
        family_name:   seed.family_name,
        date_of_birth: seed.date_of_birth,
        sex:           seed.sex,
        wikidata_qid:  seed.wikidata_qid,
      };
      match self.add_person_if_absent(candidate)? {
        AddOutcome::Created(person_id) => {
          self.upsert_xref(&person_id, &seed.source, &seed.source_id, &seed.url);
          report.persons_added += 1;
        }
        AddOutcome::Duplicate(_) => report.persons_skipped += 1,
      }
    }

    info!(
      persons_added = report.persons_added,
      persons_skipped = report.persons_skipped,
      parties_added = report.parties_added,
      parties_skipped = report.parties_skipped,
      "registry seed pass complete"
    );
    Ok(report)
  }
}
