//! Error types for `statefacts-core`.
//!
//! The `Display` form of the client-facing variants is the exact message
//! returned in the `message` field of an HTTP error body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The path parameter did not match any state code in the dataset.
  #[error("Invalid state abbreviation parameter")]
  InvalidStateCode,

  /// A request body was missing a field or carried the wrong type.
  #[error("{0}")]
  Validation(&'static str),

  /// The state has no stored fun facts. Carries the state's display name.
  #[error("No Fun Facts found for {0}")]
  NoFunFacts(String),

  /// A 1-based fun-fact index fell outside the stored list.
  #[error("No Fun Fact found at that index for {0}")]
  IndexOutOfRange(String),

  #[error("invalid dataset: {0}")]
  Dataset(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
