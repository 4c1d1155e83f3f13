//! Canonical identifiers.
//!
//! Identifier formats are part of the persistence contract and must survive
//! a round-trip bit-for-bit: `P` + 6 zero-padded digits for persons,
//! `PARTY` + 3 zero-padded digits for parties. Both are assigned
//! sequentially by the registry, continuing from the highest suffix
//! observed at load time. The padding is a minimum width: a sequence that
//! outgrows it keeps all its digits, and parsing accepts the longer form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::Error;

// ─── PersonId ────────────────────────────────────────────────────────────────

/// A stable person identifier, e.g. `P000042`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(String);

impl PersonId {
  /// Build from a sequence number: `from_seq(42)` → `P000042`.
  pub fn from_seq(seq: u32) -> Self { Self(format!("P{seq:06}")) }

  /// The numeric suffix of this id.
  pub fn seq(&self) -> u32 {
    // Format is validated on construction; the suffix always parses.
    self.0[1..].parse().unwrap_or(0)
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for PersonId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix('P')
      .ok_or_else(|| Error::MalformedPersonId(s.to_string()))?;
    if digits.len() < 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::MalformedPersonId(s.to_string()));
    }
    Ok(Self(s.to_string()))
  }
}

// Serialized as the plain identifier string; deserialization validates the
// format, so malformed ids in seed or table files fail loudly at load time.
impl Serialize for PersonId {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for PersonId {
  fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
    let s = String::deserialize(d)?;
    s.parse().map_err(de::Error::custom)
  }
}

// ─── PartyId ─────────────────────────────────────────────────────────────────

/// A stable party identifier, e.g. `PARTY001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartyId(String);

impl PartyId {
  /// Build from a sequence number: `from_seq(1)` → `PARTY001`.
  pub fn from_seq(seq: u32) -> Self { Self(format!("PARTY{seq:03}")) }

  /// The numeric suffix of this id.
  pub fn seq(&self) -> u32 { self.0[5..].parse().unwrap_or(0) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PartyId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for PartyId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("PARTY")
      .ok_or_else(|| Error::MalformedPartyId(s.to_string()))?;
    if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::MalformedPartyId(s.to_string()));
    }
    Ok(Self(s.to_string()))
  }
}

impl Serialize for PartyId {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for PartyId {
  fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
    let s = String::deserialize(d)?;
    s.parse().map_err(de::Error::custom)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn person_id_format_is_zero_padded() {
    assert_eq!(PersonId::from_seq(1).as_str(), "P000001");
    assert_eq!(PersonId::from_seq(123456).as_str(), "P123456");
  }

  #[test]
  fn person_id_round_trips_through_parse() {
    let id: PersonId = "P000042".parse().unwrap();
    assert_eq!(id.seq(), 42);
    assert_eq!(id.to_string(), "P000042");
  }

  #[test]
  fn person_id_rejects_garbage() {
    assert!("P42".parse::<PersonId>().is_err());
    assert!("Q000042".parse::<PersonId>().is_err());
    assert!("P00004X".parse::<PersonId>().is_err());
    assert!("".parse::<PersonId>().is_err());
  }

  #[test]
  fn party_id_format_is_zero_padded() {
    assert_eq!(PartyId::from_seq(1).as_str(), "PARTY001");
    assert_eq!(PartyId::from_seq(999).as_str(), "PARTY999");
  }

  #[test]
  fn party_id_rejects_garbage() {
    assert!("PARTY1".parse::<PartyId>().is_err());
    assert!("PARTY01X".parse::<PartyId>().is_err());
  }

  #[test]
  fn sequences_beyond_the_padding_round_trip() {
    // The 1000th party outgrows the 3-digit padding; it must still load.
    let id = PartyId::from_seq(1000);
    assert_eq!(id.as_str(), "PARTY1000");
    assert_eq!(id.as_str().parse::<PartyId>().unwrap().seq(), 1000);
    let back: PartyId = serde_json::from_str("\"PARTY1000\"").unwrap();
    assert_eq!(back, id);

    let id = PersonId::from_seq(1_000_000);
    assert_eq!(id.as_str(), "P1000000");
    assert_eq!(id.as_str().parse::<PersonId>().unwrap().seq(), 1_000_000);
  }

  #[test]
  fn ids_serialize_as_plain_strings() {
    let id = PersonId::from_seq(7);
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"P000007\"");
    let back: PersonId = serde_json::from_str("\"P000007\"").unwrap();
    assert_eq!(back, id);
  }

  #[test]
  fn deserialization_validates_the_format() {
    assert!(serde_json::from_str::<PersonId>("\"P07\"").is_err());
    assert!(serde_json::from_str::<PartyId>("\"PARTY1\"").is_err());
  }
}
