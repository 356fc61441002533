//! The static state reference dataset.
//!
//! The dataset is an immutable table of state records built once at startup
//! and shared by reference across request handlers. A JSON copy ships inside
//! the crate; a replacement file with the same shape can be loaded instead.

use std::{collections::HashSet, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The bundled dataset, ordered alphabetically by state name.
const EMBEDDED_DATASET: &str = include_str!("../data/states.json");

/// Codes of the two states that do not border the other 48.
pub const NON_CONTIGUOUS_CODES: [&str; 2] = ["AK", "HI"];

// ─── Record ──────────────────────────────────────────────────────────────────

/// One state's reference data. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
  /// Display name, e.g. "Georgia".
  #[serde(rename = "state")]
  pub name:             String,
  pub slug:             String,
  /// Two-letter uppercase postal code; unique within the dataset.
  pub code:             String,
  pub nickname:         String,
  pub admission_date:   NaiveDate,
  /// Order in which the state joined the union (1 = Delaware).
  pub admission_number: u8,
  #[serde(rename = "capital_city")]
  pub capital:          String,
  pub population:       u64,
}

impl StateRecord {
  pub fn is_contiguous(&self) -> bool {
    !NON_CONTIGUOUS_CODES.contains(&self.code.as_str())
  }

  /// Population rendered with `en-US` thousands separators.
  pub fn formatted_population(&self) -> String {
    format_population(self.population)
  }
}

/// Render `n` with a comma every three digits, e.g. `10,711,908`.
pub fn format_population(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

// ─── Contiguity filter ───────────────────────────────────────────────────────

/// Subset selector driven by the `contig` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContigFilter {
  /// No filtering.
  #[default]
  All,
  /// Everything except Alaska and Hawaii.
  Contiguous,
  /// Only Alaska and Hawaii.
  NonContiguous,
}

impl ContigFilter {
  /// `"true"` and `"false"` are the only recognised values; anything else,
  /// including an absent parameter, means no filtering.
  pub fn from_param(value: Option<&str>) -> Self {
    match value {
      Some("true") => Self::Contiguous,
      Some("false") => Self::NonContiguous,
      _ => Self::All,
    }
  }

  pub fn keeps(self, record: &StateRecord) -> bool {
    match self {
      Self::All => true,
      Self::Contiguous => record.is_contiguous(),
      Self::NonContiguous => !record.is_contiguous(),
    }
  }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// The full read-only table of state records, in its natural order.
#[derive(Debug, Clone)]
pub struct Dataset {
  states: Vec<StateRecord>,
}

impl Dataset {
  /// Load the dataset bundled with the crate.
  pub fn embedded() -> Result<Self> { Self::from_json(EMBEDDED_DATASET) }

  /// Load a dataset from a JSON file holding an array of records.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json(&raw)
  }

  /// Parse and check a JSON array of records. Codes must be two uppercase
  /// ASCII letters and unique.
  pub fn from_json(raw: &str) -> Result<Self> {
    let states: Vec<StateRecord> = serde_json::from_str(raw)?;
    if states.is_empty() {
      return Err(Error::Dataset("dataset contains no states".to_owned()));
    }

    let mut seen = HashSet::with_capacity(states.len());
    for record in &states {
      let well_formed = record.code.len() == 2
        && record.code.bytes().all(|b| b.is_ascii_uppercase());
      if !well_formed {
        return Err(Error::Dataset(format!(
          "malformed state code {:?}",
          record.code
        )));
      }
      if !seen.insert(record.code.as_str()) {
        return Err(Error::Dataset(format!(
          "duplicate state code {:?}",
          record.code
        )));
      }
    }

    Ok(Self { states })
  }

  pub fn states(&self) -> &[StateRecord] { &self.states }

  pub fn len(&self) -> usize { self.states.len() }

  pub fn is_empty(&self) -> bool { self.states.is_empty() }

  /// Case-insensitive lookup by two-letter code.
  pub fn find_by_code(&self, code: &str) -> Result<&StateRecord> {
    let wanted = code.to_ascii_uppercase();
    self
      .states
      .iter()
      .find(|s| s.code == wanted)
      .ok_or(Error::InvalidStateCode)
  }

  /// Records kept by `filter`, in dataset order.
  pub fn filtered(
    &self,
    filter: ContigFilter,
  ) -> impl Iterator<Item = &StateRecord> + '_ {
    self.states.iter().filter(move |s| filter.keeps(s))
  }
}
