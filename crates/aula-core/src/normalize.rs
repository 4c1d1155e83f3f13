//! Deterministic name normalization.
//!
//! Canonicalisation is the foundation of the whole matching design: the same
//! raw speaker string must always reduce to the same normalized form, with no
//! fuzzy or probabilistic step anywhere. The pipeline is lowercase →
//! transliterate to ASCII → punctuation and hyphens to spaces → whole-token
//! honorific removal → whitespace collapse.

use deunicode::deunicode;

/// Honorifics stripped during normalization. Matching is whole-token only,
/// so "donatella" is never clipped by "don"-like entries.
const HONORIFICS: &[&str] = &[
  "on",
  "onorevole",
  "ministro",
  "sottosegretario",
  "presidente",
  "pres",
  "vicepresidente",
  "vice",
  "senatore",
  "deputato",
  "dottore",
  "dott",
  "professore",
  "prof",
  "avvocato",
  "avv",
  "ingegnere",
  "ing",
  "architetto",
  "arch",
];

/// Normalize a raw name deterministically.
///
/// Pure and total: any input string yields some output, empty or
/// whitespace-only input yields `""`, and the function is idempotent
/// (`normalize(normalize(s)) == normalize(s)`).
pub fn normalize(raw: &str) -> String {
  let ascii = deunicode(&raw.to_lowercase());

  // Anything that is not a letter or digit separates tokens. This folds
  // punctuation, apostrophes and hyphens into spaces in one pass, so the
  // honorific filter below sees clean whole tokens ("on." → "on").
  let spaced: String = ascii
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
    .collect();

  spaced
    .split_whitespace()
    .filter(|token| !HONORIFICS.contains(token))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Split a normalized name into `(given, family)`.
///
/// Last token is the family name, everything before it is the given-name
/// span. Particle surnames ("de", "della", "del", "dei") are deliberately
/// not special-cased: "carlo de medici" splits as ("carlo de", "medici").
pub fn split(normalized: &str) -> (String, String) {
  let tokens: Vec<&str> = normalized.split_whitespace().collect();
  match tokens.as_slice() {
    [] => (String::new(), String::new()),
    [only] => (String::new(), (*only).to_string()),
    [given, family] => ((*given).to_string(), (*family).to_string()),
    [given @ .., family] => (given.join(" "), (*family).to_string()),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn basic_casing_and_whitespace() {
    assert_eq!(normalize("Mario Rossi"), "mario rossi");
    assert_eq!(normalize("GIORGIA MELONI"), "giorgia meloni");
    assert_eq!(normalize("  Carlo  Verdi  "), "carlo verdi");
  }

  #[test]
  fn honorifics_are_stripped() {
    assert_eq!(normalize("On. Mario Rossi"), "mario rossi");
    assert_eq!(normalize("Ministro Giorgia Meloni"), "giorgia meloni");
    assert_eq!(normalize("Pres. Carlo Verdi"), "carlo verdi");
    assert_eq!(normalize("Senatore Matteo Salvini"), "matteo salvini");
    assert_eq!(normalize("Deputato Elly Schlein"), "elly schlein");
  }

  #[test]
  fn compound_honorifics_are_stripped() {
    assert_eq!(normalize("Vice Presidente Matteo Salvini"), "matteo salvini");
    assert_eq!(normalize("Sottosegretario Carlo Verdi"), "carlo verdi");
  }

  #[test]
  fn honorific_removal_is_whole_token_only() {
    // "donatella" must not lose a "don"-like prefix; "pressa" must not
    // lose "pres".
    assert_eq!(normalize("Donatella Versace"), "donatella versace");
    assert_eq!(normalize("Ingrid Pressa"), "ingrid pressa");
  }

  #[test]
  fn accents_are_transliterated() {
    assert_eq!(normalize("José María"), "jose maria");
    assert_eq!(normalize("François"), "francois");
    assert_eq!(normalize("João"), "joao");
  }

  #[test]
  fn punctuation_collapses_to_spaces() {
    assert_eq!(normalize("Mario, Rossi."), "mario rossi");
    assert_eq!(normalize("Carlo-Verdi"), "carlo verdi");
    assert_eq!(normalize("Anna'Bianchi"), "anna bianchi");
  }

  #[test]
  fn edge_cases_are_total() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("A"), "a");
    assert_eq!(normalize("123"), "123");
  }

  #[test]
  fn normalize_is_idempotent() {
    for s in ["On. Mario Rossi", "José María", "  A  ", "", "x-y'z"] {
      let once = normalize(s);
      assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
  }

  #[test]
  fn split_token_counts() {
    assert_eq!(split(""), ("".into(), "".into()));
    assert_eq!(split("rossi"), ("".into(), "rossi".into()));
    assert_eq!(split("mario rossi"), ("mario".into(), "rossi".into()));
    assert_eq!(split("a b"), ("a".into(), "b".into()));
  }

  #[test]
  fn split_keeps_last_token_as_family() {
    assert_eq!(split("carlo de medici"), ("carlo de".into(), "medici".into()));
    assert_eq!(
      split("anna della rovere"),
      ("anna della".into(), "rovere".into())
    );
    assert_eq!(split("lucia dei conti"), ("lucia dei".into(), "conti".into()));
  }
}
