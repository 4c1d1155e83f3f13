//! `aula` — batch CLI for the parliamentary identity engine.
//!
//! Reads `aula.toml` (or the path specified with `--config`), opens the
//! JSONL store under the configured data directory, and runs one of the
//! offline pipeline stages: registry construction, SCD2 membership
//! building, or batch enrichment of intervention records.

use std::{
  fs,
  io::{BufRead as _, BufReader, Write as _},
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use aula_matcher::{AffiliationBasis, IdentityMatcher, RawIntervention};
use aula_registry::{IdentityRegistry, load_party_seeds, load_person_seeds};
use aula_store_jsonl::JsonlStore;
use aula_temporal::{Dimension, TemporalFact};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "aula", about = "Parliamentary speaker identity engine")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "aula.toml")]
  config: PathBuf,

  /// Data directory holding the JSONL tables (overrides config).
  #[arg(long)]
  data_dir: Option<PathBuf>,

  /// Directory holding curator seed CSVs (overrides config).
  #[arg(long)]
  seeds_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build or update the identity registry from seed CSVs.
  BuildRegistry,

  /// Apply membership and role seed CSVs through the SCD2 engine.
  BuildMemberships,

  /// Enrich a JSONL batch of interventions with identity fields.
  Enrich {
    /// Input JSONL file of raw intervention records.
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSONL file for enriched records.
    #[arg(short, long)]
    output: PathBuf,

    /// Resolve affiliation at each record's own date instead of today.
    #[arg(long)]
    at_record_date: bool,
  },

  /// List unmatched inbox entries awaiting curation.
  Inbox,
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file; every field has a default so a
/// bare `aula build-registry` works from a fresh checkout.
#[derive(Debug, Deserialize)]
struct AppConfig {
  data_dir:  PathBuf,
  seeds_dir: PathBuf,
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
  let settings = config::Config::builder()
    .set_default("data_dir", "public/data")?
    .set_default("seeds_dir", "seeds")?
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("AULA"))
    .build()
    .context("failed to read config")?;

  let mut cfg: AppConfig =
    settings.try_deserialize().context("failed to deserialise config")?;
  if let Some(dir) = &cli.data_dir {
    cfg.data_dir = dir.clone();
  }
  if let Some(dir) = &cli.seeds_dir {
    cfg.seeds_dir = dir.clone();
  }
  Ok(cfg)
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = load_config(&cli)?;
  let store = JsonlStore::open(&cfg.data_dir)
    .with_context(|| format!("cannot open store at {}", cfg.data_dir.display()))?;

  match cli.command {
    Command::BuildRegistry => build_registry(&store, &cfg.seeds_dir),
    Command::BuildMemberships => build_memberships(&store, &cfg.seeds_dir),
    Command::Enrich { input, output, at_record_date } => {
      let basis = if at_record_date {
        AffiliationBasis::RecordDate
      } else {
        AffiliationBasis::IngestTime
      };
      enrich(&store, &input, &output, basis)
    }
    Command::Inbox => list_inbox(&store),
  }
}

// ─── Subcommands ─────────────────────────────────────────────────────────────

fn build_registry(store: &JsonlStore, seeds_dir: &Path) -> anyhow::Result<()> {
  let mut registry = IdentityRegistry::from_tables(store.load_registry()?);

  let parties = load_party_seeds(&seeds_dir.join("parties.csv"))?;
  let persons = load_person_seeds(&seeds_dir.join("persons.csv"))?;
  let report = registry.build_from_seeds(parties, persons)?;

  store.save_registry(&registry.into_tables())?;
  info!(
    persons_added = report.persons_added,
    parties_added = report.parties_added,
    "registry build complete"
  );
  Ok(())
}

fn build_memberships(
  store: &JsonlStore,
  seeds_dir: &Path,
) -> anyhow::Result<()> {
  let mut memberships = store.load_memberships()?;
  apply_fact_seeds(&mut memberships, &seeds_dir.join("memberships.csv"))?;
  store.save_memberships(&memberships)?;

  let mut roles = store.load_roles()?;
  apply_fact_seeds(&mut roles, &seeds_dir.join("roles.csv"))?;
  store.save_roles(&roles)?;

  info!(
    memberships = memberships.len(),
    roles = roles.len(),
    degraded_closes =
      memberships.degraded_close_count() + roles.degraded_close_count(),
    overlaps = memberships.overlap_count() + roles.overlap_count(),
    "membership build complete"
  );
  Ok(())
}

/// Run every row of a fact seed CSV through the SCD2 engine. A missing
/// file contributes zero facts, like every other seed input.
fn apply_fact_seeds<F>(
  dim: &mut Dimension<F>,
  path: &Path,
) -> anyhow::Result<()>
where
  F: TemporalFact + serde::de::DeserializeOwned,
{
  if !path.exists() {
    warn!(path = %path.display(), "seed file not found, applying zero facts");
    return Ok(());
  }
  let mut reader = csv::Reader::from_path(path)
    .with_context(|| format!("cannot read seed file {}", path.display()))?;
  for row in reader.deserialize() {
    let fact: F = row
      .with_context(|| format!("malformed row in {}", path.display()))?;
    dim.apply_fact(fact);
  }
  Ok(())
}

fn enrich(
  store: &JsonlStore,
  input: &Path,
  output: &Path,
  basis: AffiliationBasis,
) -> anyhow::Result<()> {
  let registry = IdentityRegistry::from_tables(store.load_registry()?);
  let memberships = store.load_memberships()?;
  let mut matcher = IdentityMatcher::new(registry, memberships);

  let records = read_interventions(input)?;
  info!(records = records.len(), input = %input.display(), "enriching batch");

  let enriched = matcher.enrich(records, basis);
  write_enriched(output, &enriched)?;

  let stats = matcher.stats();
  let (registry, _memberships) = matcher.into_parts();
  store.save_registry(&registry.into_tables())?;

  info!(
    matched = stats.matched,
    unmatched = stats.unmatched,
    match_rate = %format!("{:.1}%", stats.match_rate() * 100.0),
    output = %output.display(),
    "enrichment complete"
  );
  Ok(())
}

fn list_inbox(store: &JsonlStore) -> anyhow::Result<()> {
  let tables = store.load_registry()?;
  if tables.inbox.is_empty() {
    println!("inbox is empty");
    return Ok(());
  }
  for entry in &tables.inbox {
    println!(
      "{:<40} first {}  last {}  samples {}",
      entry.norm_name,
      entry.first_seen.format("%Y-%m-%d"),
      entry.last_seen.format("%Y-%m-%d"),
      entry.sample_texts.len(),
    );
  }
  Ok(())
}

// ─── Batch I/O ───────────────────────────────────────────────────────────────

fn read_interventions(path: &Path) -> anyhow::Result<Vec<RawIntervention>> {
  let file = fs::File::open(path)
    .with_context(|| format!("cannot open input {}", path.display()))?;
  let mut records = Vec::new();
  for (i, line) in BufReader::new(file).lines().enumerate() {
    let line = line
      .with_context(|| format!("cannot read input {}", path.display()))?;
    if line.trim().is_empty() {
      continue;
    }
    let record = serde_json::from_str(&line).with_context(|| {
      format!("malformed record in {} at line {}", path.display(), i + 1)
    })?;
    records.push(record);
  }
  Ok(records)
}

/// Write enriched records to a temp sibling and promote atomically, the
/// same contract the store uses for its own tables.
fn write_enriched(
  path: &Path,
  records: &[aula_matcher::EnrichedIntervention],
) -> anyhow::Result<()> {
  let tmp = path.with_extension("jsonl.tmp");
  let mut file = fs::File::create(&tmp)
    .with_context(|| format!("cannot create output {}", tmp.display()))?;
  for record in records {
    serde_json::to_writer(&mut file, record)?;
    file.write_all(b"\n")?;
  }
  file.sync_all()?;
  fs::rename(&tmp, path).with_context(|| {
    format!("cannot promote {} over {}", tmp.display(), path.display())
  })?;
  Ok(())
}
