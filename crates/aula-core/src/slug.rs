//! URL-safe person slugs.
//!
//! A slug is `{family}-{given}` reduced to `[a-z0-9-]` and capped at 60
//! characters. Slugs are the registry's lookup key for idempotent person
//! creation, so the derivation must be stable across runs.

use deunicode::deunicode;

const MAX_LEN: usize = 60;
const MAX_FAMILY: usize = 30;
const MAX_GIVEN: usize = 29;

/// Derive a slug from a `(given, family)` name pair.
///
/// Empty parts omit their segment and separator: `slug("", "rossi")` →
/// `"rossi"`. If the natural concatenation exceeds 60 characters the family
/// part is truncated to 30 and the given part to 29, preserving the
/// `family-given` order.
pub fn slug(given: &str, family: &str) -> String {
  // Untruncated parts are preferred whenever the sanitised concatenation
  // fits the cap.
  let natural = sanitize(&format!("{family}-{given}"));
  if natural.len() <= MAX_LEN {
    return natural;
  }

  let family: String = family.chars().take(MAX_FAMILY).collect();
  let given: String = given.chars().take(MAX_GIVEN).collect();

  // Transliteration can expand a character into several, so the truncated
  // parts may still overshoot once sanitised. Sanitised output is pure
  // ASCII, so a byte-level cap is safe.
  let mut out = sanitize(&format!("{family}-{given}"));
  out.truncate(MAX_LEN);
  out.trim_end_matches('-').to_string()
}

/// Lowercase, transliterate, keep `[a-z0-9 -]`, spaces → hyphens, collapse
/// runs of hyphens, trim hyphens at both ends.
fn sanitize(raw: &str) -> String {
  let ascii = deunicode(&raw.to_lowercase());

  let mut out = String::with_capacity(ascii.len());
  for c in ascii.chars() {
    match c {
      'a'..='z' | '0'..='9' => out.push(c),
      ' ' | '-' => {
        if !out.ends_with('-') {
          out.push('-');
        }
      }
      _ => {}
    }
  }

  out.trim_matches('-').to_string()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn family_comes_first() {
    assert_eq!(slug("mario", "rossi"), "rossi-mario");
    assert_eq!(slug("giorgia", "meloni"), "meloni-giorgia");
  }

  #[test]
  fn accents_fold_to_ascii() {
    assert_eq!(slug("josé", "maría"), "maria-jose");
    assert_eq!(slug("françois", "dupont"), "dupont-francois");
  }

  #[test]
  fn spaces_and_hyphens_collapse() {
    assert_eq!(slug("carlo", "de-medici"), "de-medici-carlo");
    assert_eq!(slug("anna", "della rovere"), "della-rovere-anna");
  }

  #[test]
  fn empty_parts_drop_their_separator() {
    assert_eq!(slug("", "rossi"), "rossi");
    assert_eq!(slug("mario", ""), "mario");
    assert_eq!(slug("", ""), "");
  }

  #[test]
  fn length_is_capped_at_60() {
    let given = "a".repeat(40);
    let family = "b".repeat(40);
    let s = slug(&given, &family);
    assert!(s.len() <= 60, "slug too long: {} chars", s.len());
    assert!(s.contains('a'));
    assert!(s.contains('b'));
    assert!(s.starts_with('b'), "family segment must come first");
  }

  #[test]
  fn truncation_keeps_family_given_order() {
    let given = "g".repeat(35);
    let family = "f".repeat(35);
    let s = slug(&given, &family);
    assert_eq!(s, format!("{}-{}", "f".repeat(30), "g".repeat(29)));
  }
}
