//! Tests for the SCD2 dimension over membership and role facts.

use aula_core::{PartyId, PersonId};
use chrono::NaiveDate;

use crate::{
  Dimension, MembershipFact, RoleFact,
  dimension::{Applied, TemporalFact},
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn membership(
  person: u32,
  party: u32,
  from: NaiveDate,
  to: Option<NaiveDate>,
) -> MembershipFact {
  MembershipFact {
    person_id:     PersonId::from_seq(person),
    party_id:      PartyId::from_seq(party),
    group_id_aula: Some(format!("GROUP{party}")),
    role_in_party: None,
    valid_from:    from,
    valid_to:      to,
    source_url:    "https://example.org/source".into(),
  }
}

// ─── apply_fact ──────────────────────────────────────────────────────────────

#[test]
fn first_fact_for_a_key_is_appended_open() {
  let mut dim = Dimension::new();
  let applied = dim.apply_fact(membership(1, 1, d(2023, 3, 12), None));

  assert_eq!(applied, Applied::Appended);
  assert_eq!(dim.len(), 1);
  assert!(dim.facts()[0].valid_to.is_none());
}

#[test]
fn new_fact_closes_the_open_record_the_day_before() {
  // Backfilling a party switch: the open 2013 membership must close on
  // 2023-06-11 when the 2023-06-12 fact lands.
  let mut dim = Dimension::new();
  dim.apply_fact(membership(4, 4, d(2013, 11, 16), None));
  let applied = dim.apply_fact(membership(4, 4, d(2023, 6, 12), None));

  assert_eq!(applied, Applied::ClosedPrior(d(2023, 6, 11)));
  assert_eq!(dim.facts()[0].valid_to, Some(d(2023, 6, 11)));
  assert!(dim.facts()[1].valid_to.is_none());
}

#[test]
fn at_most_one_open_record_per_natural_key() {
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, d(2018, 1, 1), None));
  dim.apply_fact(membership(1, 1, d(2020, 1, 1), None));
  dim.apply_fact(membership(1, 1, d(2022, 1, 1), None));

  let open: Vec<_> =
    dim.facts().iter().filter(|f| f.valid_to.is_none()).collect();
  assert_eq!(open.len(), 1);
  assert_eq!(open[0].valid_from, d(2022, 1, 1));
}

#[test]
fn different_parties_are_independent_keys() {
  // Same person, two parties: neither insert closes the other.
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, d(2018, 1, 1), None));
  let applied = dim.apply_fact(membership(1, 2, d(2020, 1, 1), None));

  assert_eq!(applied, Applied::Appended);
  assert!(dim.facts().iter().all(|f| f.valid_to.is_none()));
}

#[test]
fn closed_historical_fact_does_not_disturb_open_records() {
  // Backfill of a deceased office-holder's fixed window.
  let mut dim = Dimension::new();
  dim.apply_fact(membership(4, 4, d(2013, 11, 16), Some(d(2023, 6, 12))));
  assert_eq!(dim.facts()[0].valid_to, Some(d(2023, 6, 12)));

  // A later open fact for the same key finds no open prior to close.
  let applied = dim.apply_fact(membership(4, 4, d(2024, 1, 1), None));
  assert_eq!(applied, Applied::Appended);
}

#[test]
fn close_degrades_when_no_prior_day_exists() {
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, NaiveDate::MIN, None));
  let applied = dim.apply_fact(membership(1, 1, NaiveDate::MIN, None));

  // No day exists before NaiveDate::MIN; the close falls back to the new
  // fact's own start instead of aborting.
  assert_eq!(applied, Applied::ClosedPrior(NaiveDate::MIN));
  assert_eq!(dim.degraded_close_count(), 1);
}

// ─── point_in_time ───────────────────────────────────────────────────────────

#[test]
fn point_in_time_hits_the_containing_interval() {
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, d(2018, 1, 1), None));
  dim.apply_fact(membership(1, 2, d(2021, 5, 10), None));
  // First membership is now closed at 2021-05-09.

  let p1 = PersonId::from_seq(1);
  let hit = dim.point_in_time(&p1, d(2019, 6, 1)).unwrap();
  assert_eq!(hit.party_id, PartyId::from_seq(1));

  let hit = dim.point_in_time(&p1, d(2022, 1, 1)).unwrap();
  assert_eq!(hit.party_id, PartyId::from_seq(2));
}

#[test]
fn interval_bounds_are_inclusive() {
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, d(2020, 1, 1), Some(d(2020, 12, 31))));

  let p1 = PersonId::from_seq(1);
  assert!(dim.point_in_time(&p1, d(2020, 1, 1)).is_some());
  assert!(dim.point_in_time(&p1, d(2020, 12, 31)).is_some());
  assert!(dim.point_in_time(&p1, d(2019, 12, 31)).is_none());
  assert!(dim.point_in_time(&p1, d(2021, 1, 1)).is_none());
}

#[test]
fn query_outside_all_intervals_returns_none() {
  let mut dim = Dimension::new();
  dim.apply_fact(membership(1, 1, d(2020, 1, 1), Some(d(2021, 1, 1))));

  let p2 = PersonId::from_seq(2);
  assert!(dim.point_in_time(&p2, d(2020, 6, 1)).is_none());
}

#[test]
fn curated_overlap_resolves_by_storage_order() {
  // Two hand-inserted overlapping intervals for the same key: the first
  // row in storage order wins, and the overlap counter flags it.
  let facts = vec![
    membership(1, 1, d(2020, 1, 1), Some(d(2022, 1, 1))),
    membership(1, 1, d(2021, 1, 1), Some(d(2023, 1, 1))),
  ];
  let dim = Dimension::from_facts(facts);

  let p1 = PersonId::from_seq(1);
  let hit = dim.point_in_time(&p1, d(2021, 6, 1)).unwrap();
  assert_eq!(hit.valid_from, d(2020, 1, 1));
  assert_eq!(dim.overlap_count(), 1);
}

// ─── RoleFact key ────────────────────────────────────────────────────────────

fn role(person: u32, role_type: &str, org: &str, from: NaiveDate) -> RoleFact {
  RoleFact {
    person_id:  PersonId::from_seq(person),
    role_type:  role_type.into(),
    org:        org.into(),
    title:      None,
    grade:      None,
    valid_from: from,
    valid_to:   None,
    source_url: "https://example.org/gov".into(),
  }
}

#[test]
fn role_key_includes_role_type_and_org() {
  let mut dim = Dimension::new();
  dim.apply_fact(role(2, "minister", "Governo", d(2022, 10, 22)));
  dim.apply_fact(role(2, "deputy", "Camera", d(2022, 10, 13)));

  // Distinct keys: both stay open.
  assert!(dim.facts().iter().all(|f| f.valid_to().is_none()));

  // Same key: the minister record closes.
  dim.apply_fact(role(2, "minister", "Governo", d(2024, 3, 1)));
  let closed: Vec<_> =
    dim.facts().iter().filter(|f| f.valid_to().is_some()).collect();
  assert_eq!(closed.len(), 1);
  assert_eq!(closed[0].valid_to(), Some(d(2024, 2, 29)));
}
