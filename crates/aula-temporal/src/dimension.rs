//! The generic SCD2 dimension.

use aula_core::PersonId;
use chrono::NaiveDate;
use tracing::warn;

// ─── TemporalFact ────────────────────────────────────────────────────────────

/// A versioned fact about a subject.
///
/// Validity windows are closed intervals at day granularity:
/// `valid_from ≤ t ≤ valid_to`, with `valid_to = None` meaning currently
/// open. The natural key identifies "the same fact over time" — e.g.
/// person + party for memberships — as opposed to any one row's identity.
pub trait TemporalFact {
  /// Natural-key type; equality decides which prior record gets closed.
  type Key: PartialEq;

  fn subject_id(&self) -> &PersonId;
  fn natural_key(&self) -> Self::Key;
  fn valid_from(&self) -> NaiveDate;
  fn valid_to(&self) -> Option<NaiveDate>;
  /// Close this record's window at `on` (inclusive).
  fn close(&mut self, on: NaiveDate);
}

// ─── Dimension ───────────────────────────────────────────────────────────────

/// What [`Dimension::apply_fact`] did to prior history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
  /// No open record existed for the natural key; the fact was appended.
  Appended,
  /// The open record for the key was closed on the given day.
  ClosedPrior(NaiveDate),
}

/// An in-memory SCD2 dimension over facts of type `F`.
///
/// Invariant: at most one record per natural key has `valid_to = None`.
/// The invariant holds for everything written through [`apply_fact`];
/// overlap introduced by hand-curated data is surfaced through
/// [`overlap_count`], not silently repaired.
///
/// [`apply_fact`]: Dimension::apply_fact
/// [`overlap_count`]: Dimension::overlap_count
#[derive(Debug, Clone)]
pub struct Dimension<F: TemporalFact> {
  facts:           Vec<F>,
  degraded_closes: u64,
}

impl<F: TemporalFact> Default for Dimension<F> {
  fn default() -> Self { Self::new() }
}

impl<F: TemporalFact> Dimension<F> {
  pub fn new() -> Self {
    Self { facts: Vec::new(), degraded_closes: 0 }
  }

  /// Rehydrate from persisted rows, preserving storage order.
  pub fn from_facts(facts: Vec<F>) -> Self {
    Self { facts, degraded_closes: 0 }
  }

  /// Insert a fact, closing any open record sharing its natural key.
  ///
  /// The prior record is closed the day before the new fact begins. When
  /// that day is unrepresentable (the new fact starts at the minimum
  /// date), the close degrades to the new fact's own `valid_from` rather
  /// than aborting — logged and counted for curator follow-up.
  ///
  /// The new fact's `valid_to` is kept as supplied: `None` opens a new
  /// current record, `Some` backfills an already-closed historical window.
  pub fn apply_fact(&mut self, fact: F) -> Applied {
    let key = fact.natural_key();
    let starts = fact.valid_from();

    let open = self
      .facts
      .iter_mut()
      .find(|f| f.valid_to().is_none() && f.natural_key() == key);

    let applied = match open {
      Some(prior) => {
        let close_on = match starts.pred_opt() {
          Some(day) => day,
          None => {
            warn!(
              subject = %fact.subject_id(),
              %starts,
              "no representable day before new fact, closing prior record \
               on the new fact's start day"
            );
            self.degraded_closes += 1;
            starts
          }
        };
        prior.close(close_on);
        Applied::ClosedPrior(close_on)
      }
      None => Applied::Appended,
    };

    self.facts.push(fact);
    applied
  }

  /// The fact valid for `subject` at `ts`, if any.
  ///
  /// Linear scan in storage order; the first fact whose closed interval
  /// contains `ts` wins. Given the invariant at most one fact can match —
  /// when curated data overlaps, storage order decides deterministically.
  pub fn point_in_time(&self, subject: &PersonId, ts: NaiveDate) -> Option<&F> {
    self.facts.iter().find(|f| {
      f.subject_id() == subject
        && f.valid_from() <= ts
        && f.valid_to().is_none_or(|until| ts <= until)
    })
  }

  /// Data-quality counter: pairs of intervals sharing a natural key whose
  /// validity windows overlap. Curated data only —
  /// [`Dimension::apply_fact`] never produces overlap.
  pub fn overlap_count(&self) -> usize {
    let mut overlaps = 0;
    for (i, a) in self.facts.iter().enumerate() {
      for b in &self.facts[i + 1..] {
        if a.natural_key() != b.natural_key() {
          continue;
        }
        let a_end = a.valid_to().unwrap_or(NaiveDate::MAX);
        let b_end = b.valid_to().unwrap_or(NaiveDate::MAX);
        if a.valid_from() <= b_end && b.valid_from() <= a_end {
          overlaps += 1;
        }
      }
    }
    overlaps
  }

  /// Closes that had to degrade to the new fact's own start day.
  pub fn degraded_close_count(&self) -> u64 { self.degraded_closes }

  pub fn facts(&self) -> &[F] { &self.facts }

  pub fn into_facts(self) -> Vec<F> { self.facts }

  pub fn len(&self) -> usize { self.facts.len() }

  pub fn is_empty(&self) -> bool { self.facts.is_empty() }
}
