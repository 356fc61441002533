//! [`SqliteStore`] — the SQLite implementation of [`FunFactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use statefacts_core::{fun_fact::FunFactDocument, store::FunFactStore};

use crate::{
  Error, Result,
  encode::{RawDocument, encode_facts},
  schema::SCHEMA,
};

const UPSERT: &str = "INSERT INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)
   ON CONFLICT(state_code) DO UPDATE SET funfacts = excluded.funfacts";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fun-fact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Box a codec error raised inside a connection closure.
fn in_call(e: Error) -> tokio_rusqlite::Error { tokio_rusqlite::Error::Other(Box::new(e)) }

// ─── FunFactStore impl ───────────────────────────────────────────────────────

impl FunFactStore for SqliteStore {
  type Error = Error;

  async fn find_all(&self) -> Result<Vec<FunFactDocument>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT state_code, funfacts FROM fun_facts ORDER BY state_code",
        )?;
        let rows = stmt
          .query_map([], RawDocument::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }

  async fn find_one(&self, state_code: &str) -> Result<Option<FunFactDocument>> {
    let code = state_code.to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT state_code, funfacts FROM fun_facts WHERE state_code = ?1",
              rusqlite::params![code],
              RawDocument::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn create(&self, document: FunFactDocument) -> Result<FunFactDocument> {
    let code    = document.state_code.clone();
    let encoded = encode_facts(&document.funfacts)?;

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT OR IGNORE INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)",
          rusqlite::params![code, encoded],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if !inserted {
      return Err(Error::AlreadyExists(document.state_code));
    }
    tracing::debug!(state = %document.state_code, "created fun fact document");
    Ok(document)
  }

  async fn save(&self, document: FunFactDocument) -> Result<FunFactDocument> {
    let code    = document.state_code.clone();
    let encoded = encode_facts(&document.funfacts)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(UPSERT, rusqlite::params![code, encoded])?;
        Ok(())
      })
      .await?;

    Ok(document)
  }

  async fn append(
    &self,
    state_code: &str,
    funfacts:   Vec<String>,
  ) -> Result<FunFactDocument> {
    let code = state_code.to_owned();

    // Read, extend and write back inside one transaction on the connection
    // thread so the find-or-create step cannot interleave with another call.
    let document = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let stored: Option<RawDocument> = tx
          .query_row(
            "SELECT state_code, funfacts FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![code],
            RawDocument::from_row,
          )
          .optional()?;

        let mut document = match stored {
          Some(raw) => raw.into_document().map_err(in_call)?,
          None => FunFactDocument::new(code, Vec::new()),
        };
        document.append(funfacts);

        let encoded = encode_facts(&document.funfacts).map_err(in_call)?;
        tx.execute(UPSERT, rusqlite::params![document.state_code, encoded])?;
        tx.commit()?;

        Ok(document)
      })
      .await?;

    tracing::debug!(
      state = %document.state_code,
      count = document.funfacts.len(),
      "appended fun facts"
    );
    Ok(document)
  }
}
