//! Conversions between [`FunFactDocument`] and the plain-text columns stored
//! in SQLite. The fact list is stored as a compact JSON array.

use statefacts_core::fun_fact::FunFactDocument;

use crate::Result;

/// A `fun_facts` row exactly as read from SQLite.
pub struct RawDocument {
  pub state_code: String,
  pub funfacts:   String,
}

impl RawDocument {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { state_code: row.get(0)?, funfacts: row.get(1)? })
  }

  pub fn into_document(self) -> Result<FunFactDocument> {
    Ok(FunFactDocument {
      state_code: self.state_code,
      funfacts:   decode_facts(&self.funfacts)?,
    })
  }
}

pub fn encode_facts(facts: &[String]) -> Result<String> {
  Ok(serde_json::to_string(facts)?)
}

pub fn decode_facts(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}
