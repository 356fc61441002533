//! Validation of fun-fact request bodies.
//!
//! Bodies arrive as loosely-typed JSON. A field counts as missing when it is
//! absent or holds a falsy value (`null`, `false`, `0`, `""`), so a literal
//! index of `0` is reported as a missing index rather than an out-of-range
//! one.

use serde_json::Value;

use crate::{Error, Result, fun_fact::FactIndex};

pub const FUN_FACTS_REQUIRED: &str = "State fun facts value required";
pub const FUN_FACTS_NOT_ARRAY: &str = "State fun facts value must be an array";
pub const FUN_FACT_ENTRIES_NOT_STRINGS: &str =
  "State fun fact entries must be strings";
pub const INDEX_REQUIRED: &str = "State fun fact index value required";
pub const FUN_FACT_REQUIRED: &str = "State fun fact value required";
pub const FUN_FACT_NOT_STRING: &str = "State fun fact value must be a string";

/// The `funfacts` array of a create/append body.
pub fn validate_fun_facts_payload(body: &Value) -> Result<Vec<String>> {
  let value = present(body, "funfacts").ok_or(Error::Validation(FUN_FACTS_REQUIRED))?;
  let items = value
    .as_array()
    .ok_or(Error::Validation(FUN_FACTS_NOT_ARRAY))?;
  items
    .iter()
    .map(|item| fact_text(item).ok_or(Error::Validation(FUN_FACT_ENTRIES_NOT_STRINGS)))
    .collect()
}

/// The `index` and `funfact` fields of an update body, checked in that order.
pub fn validate_index_and_fact(body: &Value) -> Result<(FactIndex, String)> {
  let index = validate_index(body)?;
  let value = present(body, "funfact").ok_or(Error::Validation(FUN_FACT_REQUIRED))?;
  let fact = fact_text(value).ok_or(Error::Validation(FUN_FACT_NOT_STRING))?;
  Ok((index, fact))
}

/// The `index` field of an update or delete body.
///
/// Numbers and numeric strings are accepted as-is; any other truthy value
/// becomes an index that matches no position.
pub fn validate_index(body: &Value) -> Result<FactIndex> {
  let value = present(body, "index").ok_or(Error::Validation(INDEX_REQUIRED))?;
  let raw = match value {
    Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
    Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
    _ => f64::NAN,
  };
  Ok(FactIndex::new(raw))
}

/// `body[key]` when it exists and is truthy.
fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
  body.get(key).filter(|v| is_truthy(v))
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Scalars are stored in their text form; arrays and objects are rejected.
fn fact_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}
