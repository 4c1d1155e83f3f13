//! The Identity Matcher — deterministic resolution of raw speaker names.
//!
//! The cascade is exact-match only: active alias, then `(given, family)`
//! equality (both orders), then the crosswalk extension point. Anything
//! unresolved lands in the inbox for curation; matching never fails a
//! batch.

pub mod matcher;
pub mod record;

pub use matcher::{
  AffiliationBasis, IdentityMatcher, MatchStats, ResolvedIdentity,
};
pub use record::{EnrichedIntervention, RawIntervention};
