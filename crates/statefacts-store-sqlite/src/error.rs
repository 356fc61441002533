//! Error type for `statefacts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// `create` was called for a code that already has a document.
  #[error("a fun fact document already exists for {0}")]
  AlreadyExists(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
