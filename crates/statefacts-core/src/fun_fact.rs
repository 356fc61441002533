//! Persisted fun-fact documents.
//!
//! There is at most one document per state code. Its `funfacts` list is
//! ordered; clients address entries by 1-based position, so every positional
//! operation goes through [`FactIndex`].

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

// ─── Document ────────────────────────────────────────────────────────────────

/// The stored fun facts for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactDocument {
  /// Uppercase two-letter code. Not checked against the dataset by stores.
  pub state_code: String,
  #[serde(default)]
  pub funfacts:   Vec<String>,
}

impl FunFactDocument {
  pub fn new(state_code: impl Into<String>, funfacts: Vec<String>) -> Self {
    Self { state_code: state_code.into(), funfacts }
  }

  /// An empty list counts the same as no document at all.
  pub fn has_facts(&self) -> bool { !self.funfacts.is_empty() }

  /// Add `facts` after the existing entries, preserving order.
  pub fn append(&mut self, facts: impl IntoIterator<Item = String>) {
    self.funfacts.extend(facts);
  }

  /// Overwrite the entry at `index`. Returns the replaced text, or `None` if
  /// `index` is out of range (the list is left untouched).
  pub fn replace_at(
    &mut self,
    index: FactIndex,
    fact: String,
  ) -> Option<String> {
    let pos = index.position(self.funfacts.len())?;
    Some(std::mem::replace(&mut self.funfacts[pos], fact))
  }

  /// Remove the entry at `index`, shifting later entries down. Returns the
  /// removed text, or `None` if `index` is out of range.
  pub fn remove_at(&mut self, index: FactIndex) -> Option<String> {
    let pos = index.position(self.funfacts.len())?;
    Some(self.funfacts.remove(pos))
  }

  /// Pick one entry uniformly at random. `None` when the list is empty.
  pub fn random_fact<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
    self.funfacts.choose(rng).map(String::as_str)
  }
}

// ─── Index ───────────────────────────────────────────────────────────────────

/// A client-supplied 1-based position into a fun-fact list.
///
/// Held as the raw numeric value so that negative, fractional and oversized
/// inputs all survive validation and fail the same bounds check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactIndex(f64);

impl FactIndex {
  pub fn new(value: f64) -> Self { Self(value) }

  pub fn value(self) -> f64 { self.0 }

  /// The zero-based slot for a list of length `len`, if `1 <= index <= len`
  /// and the index is a whole number.
  pub fn position(self, len: usize) -> Option<usize> {
    let v = self.0;
    if v.is_nan() || v.fract() != 0.0 || v < 1.0 || v > len as f64 {
      return None;
    }
    Some(v as usize - 1)
  }
}

impl From<i64> for FactIndex {
  fn from(value: i64) -> Self { Self(value as f64) }
}

#[cfg(test)]
mod tests {
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;

  fn doc(facts: &[&str]) -> FunFactDocument {
    FunFactDocument::new("GA", facts.iter().map(|s| s.to_string()).collect())
  }

  #[test]
  fn serialises_with_camel_case_key() {
    let json = serde_json::to_value(doc(&["Peach state"])).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "stateCode": "GA", "funfacts": ["Peach state"] })
    );
  }

  #[test]
  fn missing_funfacts_deserialises_as_empty() {
    let d: FunFactDocument =
      serde_json::from_str(r#"{"stateCode":"GA"}"#).unwrap();
    assert!(!d.has_facts());
  }

  #[test]
  fn append_is_associative() {
    let mut twice = FunFactDocument::new("GA", Vec::new());
    twice.append(["a".to_string()]);
    twice.append(["b".to_string()]);

    let mut once = FunFactDocument::new("GA", Vec::new());
    once.append(["a".to_string(), "b".to_string()]);

    assert_eq!(twice, once);
    assert_eq!(once.funfacts, ["a", "b"]);
  }

  #[test]
  fn replace_changes_exactly_one_entry() {
    let mut d = doc(&["a", "b", "c"]);
    let old = d.replace_at(FactIndex::from(2), "B".into());
    assert_eq!(old.as_deref(), Some("b"));
    assert_eq!(d.funfacts, ["a", "B", "c"]);
  }

  #[test]
  fn remove_shifts_later_entries_down() {
    let mut d = doc(&["a", "b", "c"]);
    assert_eq!(d.remove_at(FactIndex::from(1)).as_deref(), Some("a"));
    assert_eq!(d.funfacts, ["b", "c"]);
  }

  #[test]
  fn removing_the_only_entry_leaves_an_empty_list() {
    let mut d = doc(&["only"]);
    d.remove_at(FactIndex::from(1));
    assert_eq!(d.state_code, "GA");
    assert!(d.funfacts.is_empty());
  }

  #[test]
  fn bounds_are_one_based_and_inclusive() {
    let n = 3;
    for i in 1..=n {
      assert_eq!(FactIndex::from(i as i64).position(n), Some(i - 1));
    }
    for bad in [0, -1, -7, n as i64 + 1, 100] {
      assert_eq!(FactIndex::from(bad).position(n), None, "{bad}");
    }
    assert_eq!(FactIndex::new(1.5).position(n), None);
    assert_eq!(FactIndex::new(f64::NAN).position(n), None);
  }

  #[test]
  fn out_of_range_edits_leave_the_list_untouched() {
    let mut d = doc(&["a", "b"]);
    assert!(d.replace_at(FactIndex::from(3), "x".into()).is_none());
    assert!(d.remove_at(FactIndex::from(0)).is_none());
    assert_eq!(d.funfacts, ["a", "b"]);
  }

  #[test]
  fn random_fact_on_empty_list_is_none() {
    let d = doc(&[]);
    assert!(d.random_fact(&mut StdRng::seed_from_u64(7)).is_none());
  }

  #[test]
  fn random_fact_reaches_every_entry() {
    let d = doc(&["a", "b", "c"]);
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
      let fact = d.random_fact(&mut rng).unwrap();
      assert!(d.funfacts.iter().any(|f| f == fact));
      seen.insert(fact.to_owned());
    }
    assert_eq!(seen.len(), 3);
  }

  #[test]
  fn random_fact_from_single_entry_is_that_entry() {
    let d = doc(&["only"]);
    assert_eq!(d.random_fact(&mut StdRng::seed_from_u64(1)), Some("only"));
  }
}
