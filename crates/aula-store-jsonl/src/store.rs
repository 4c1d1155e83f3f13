//! [`JsonlStore`] — one JSONL file per table under a data directory.

use std::{
  fs,
  io::{BufRead as _, BufReader, Write as _},
  path::PathBuf,
};

use aula_registry::RegistryTables;
use aula_temporal::{Dimension, MembershipFact, RoleFact};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{Error, Result};

// Table file names. The basenames are part of the on-disk contract and are
// shared with the curation tooling.
const PERSONS: &str = "persons.jsonl";
const PARTIES: &str = "party_registry.jsonl";
const ALIASES: &str = "person_aliases.jsonl";
const XREFS: &str = "person_xref.jsonl";
const INBOX: &str = "identities_inbox.jsonl";
const MEMBERSHIPS: &str = "party_membership.jsonl";
const ROLES: &str = "roles.jsonl";

/// A store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonlStore {
  dir: PathBuf,
}

impl JsonlStore {
  /// Open (or create) a store at `dir`.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)
      .map_err(|source| Error::Write { path: dir.clone(), source })?;
    Ok(Self { dir })
  }

  // ── Registry tables ───────────────────────────────────────────────────

  pub fn load_registry(&self) -> Result<RegistryTables> {
    Ok(RegistryTables {
      persons: self.read_table(PERSONS)?,
      parties: self.read_table(PARTIES)?,
      aliases: self.read_table(ALIASES)?,
      xrefs:   self.read_table(XREFS)?,
      inbox:   self.read_table(INBOX)?,
    })
  }

  pub fn save_registry(&self, tables: &RegistryTables) -> Result<()> {
    self.write_table(PERSONS, &tables.persons)?;
    self.write_table(PARTIES, &tables.parties)?;
    self.write_table(ALIASES, &tables.aliases)?;
    self.write_table(XREFS, &tables.xrefs)?;
    self.write_table(INBOX, &tables.inbox)?;
    info!(
      dir = %self.dir.display(),
      persons = tables.persons.len(),
      parties = tables.parties.len(),
      aliases = tables.aliases.len(),
      xrefs = tables.xrefs.len(),
      inbox = tables.inbox.len(),
      "registry tables persisted"
    );
    Ok(())
  }

  // ── Temporal dimensions ───────────────────────────────────────────────

  pub fn load_memberships(&self) -> Result<Dimension<MembershipFact>> {
    Ok(Dimension::from_facts(self.read_table(MEMBERSHIPS)?))
  }

  pub fn save_memberships(
    &self,
    dim: &Dimension<MembershipFact>,
  ) -> Result<()> {
    self.write_table(MEMBERSHIPS, dim.facts())
  }

  pub fn load_roles(&self) -> Result<Dimension<RoleFact>> {
    Ok(Dimension::from_facts(self.read_table(ROLES)?))
  }

  pub fn save_roles(&self, dim: &Dimension<RoleFact>) -> Result<()> {
    self.write_table(ROLES, dim.facts())
  }

  // ── Generic JSONL plumbing ────────────────────────────────────────────

  /// Read all rows of a table. A missing file is an empty table, not an
  /// error — the store bootstraps itself on first run.
  fn read_table<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
    let path = self.dir.join(name);
    let file = match fs::File::open(&path) {
      Ok(file) => file,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "table not yet created, loading empty");
        return Ok(Vec::new());
      }
      Err(source) => return Err(Error::Read { path, source }),
    };

    let mut rows = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
      let line =
        line.map_err(|source| Error::Read { path: path.clone(), source })?;
      if line.trim().is_empty() {
        continue;
      }
      let row = serde_json::from_str(&line).map_err(|source| Error::Decode {
        path: path.clone(),
        line: i + 1,
        source,
      })?;
      rows.push(row);
    }
    Ok(rows)
  }

  /// Write all rows of a table to `<name>.tmp`, then atomically promote
  /// the temp file over the previous one.
  fn write_table<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<()> {
    let path = self.dir.join(name);
    let tmp = self.dir.join(format!("{name}.tmp"));

    let mut file = fs::File::create(&tmp)
      .map_err(|source| Error::Write { path: tmp.clone(), source })?;
    for row in rows {
      let line = serde_json::to_string(row)
        .map_err(|source| Error::Encode { path: path.clone(), source })?;
      file
        .write_all(line.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .map_err(|source| Error::Write { path: tmp.clone(), source })?;
    }
    file
      .sync_all()
      .map_err(|source| Error::Write { path: tmp.clone(), source })?;

    fs::rename(&tmp, &path)
      .map_err(|source| Error::Promote { tmp, path, source })
  }
}
