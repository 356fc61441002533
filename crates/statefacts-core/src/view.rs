//! The merged read model returned by the state endpoints.
//!
//! A view is computed per request from an immutable [`StateRecord`] and the
//! state's [`FunFactDocument`], if any. It is never stored.

use std::collections::HashMap;

use serde::Serialize;

use crate::{fun_fact::FunFactDocument, state::StateRecord};

/// A state record plus its fun facts, when there are any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedStateView {
  #[serde(flatten)]
  pub record:   StateRecord,
  /// Omitted entirely when the document is absent or its list is empty.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub funfacts: Option<Vec<String>>,
}

impl MergedStateView {
  pub fn merge(
    record: &StateRecord,
    document: Option<&FunFactDocument>,
  ) -> Self {
    let funfacts = document
      .filter(|d| d.has_facts())
      .map(|d| d.funfacts.clone());
    Self { record: record.clone(), funfacts }
  }
}

/// Left-merge `records` with `documents` by state code, keeping the order of
/// `records`. Documents whose code matches no record are ignored.
pub fn merge_all<'a>(
  records: impl IntoIterator<Item = &'a StateRecord>,
  documents: &[FunFactDocument],
) -> Vec<MergedStateView> {
  let by_code: HashMap<&str, &FunFactDocument> = documents
    .iter()
    .map(|d| (d.state_code.as_str(), d))
    .collect();

  records
    .into_iter()
    .map(|r| MergedStateView::merge(r, by_code.get(r.code.as_str()).copied()))
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::Value;

  use super::*;
  use crate::state::{ContigFilter, Dataset};

  fn dataset() -> Dataset { Dataset::embedded().unwrap() }

  #[test]
  fn merge_without_document_is_the_static_record() {
    let ds = dataset();
    let ga = ds.find_by_code("GA").unwrap();

    let view = serde_json::to_value(MergedStateView::merge(ga, None)).unwrap();
    assert_eq!(view, serde_json::to_value(ga).unwrap());
  }

  #[test]
  fn merge_with_empty_document_injects_no_key() {
    let ds = dataset();
    let ga = ds.find_by_code("GA").unwrap();
    let empty = FunFactDocument::new("GA", Vec::new());

    let view =
      serde_json::to_value(MergedStateView::merge(ga, Some(&empty))).unwrap();
    assert!(view.get("funfacts").is_none());
    assert_eq!(view, serde_json::to_value(ga).unwrap());
  }

  #[test]
  fn merge_with_facts_adds_funfacts() {
    let ds = dataset();
    let ga = ds.find_by_code("GA").unwrap();
    let doc = FunFactDocument::new("GA", vec!["Peach state".into()]);

    let view =
      serde_json::to_value(MergedStateView::merge(ga, Some(&doc))).unwrap();
    assert_eq!(view["state"], "Georgia");
    assert_eq!(view["capital_city"], "Atlanta");
    assert_eq!(view["funfacts"], serde_json::json!(["Peach state"]));
  }

  #[test]
  fn merge_all_keeps_record_order_and_matches_by_code() {
    let ds = dataset();
    let docs = vec![
      FunFactDocument::new("HI", vec!["Volcanoes".into()]),
      FunFactDocument::new("ZZ", vec!["Orphan".into()]),
      FunFactDocument::new("AK", Vec::new()),
    ];

    let views = merge_all(ds.filtered(ContigFilter::NonContiguous), &docs);
    let codes: Vec<_> = views.iter().map(|v| v.record.code.as_str()).collect();
    assert_eq!(codes, ["AK", "HI"]);
    assert_eq!(views[0].funfacts, None);
    assert_eq!(views[1].funfacts, Some(vec!["Volcanoes".to_string()]));
  }

  #[test]
  fn merge_all_over_full_dataset() {
    let ds = dataset();
    let views = merge_all(ds.states(), &[]);
    assert_eq!(views.len(), 50);
    let json = serde_json::to_value(&views).unwrap();
    let arr = json.as_array().unwrap();
    assert!(arr.iter().all(|v: &Value| v.get("funfacts").is_none()));
  }
}
