//! The `FunFactStore` trait.
//!
//! Implemented by storage backends (e.g. `statefacts-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::fun_fact::FunFactDocument;

/// Abstraction over the document store holding per-state fun facts.
///
/// Documents are keyed by uppercase state code. Stores do not check codes
/// against the dataset; callers validate first.
///
/// There is no cross-call locking: read-modify-write sequences built from
/// [`find_one`](Self::find_one) and [`save`](Self::save) are last-writer-wins.
pub trait FunFactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored document, ordered by state code.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<FunFactDocument>, Self::Error>> + Send + '_;

  /// The document for `state_code`, or `None` if none has been created.
  fn find_one<'a>(
    &'a self,
    state_code: &'a str,
  ) -> impl Future<Output = Result<Option<FunFactDocument>, Self::Error>>
  + Send
  + 'a;

  /// Insert a new document. Fails if one already exists for the code.
  fn create(
    &self,
    document: FunFactDocument,
  ) -> impl Future<Output = Result<FunFactDocument, Self::Error>> + Send + '_;

  /// Write `document`, replacing any stored document with the same code.
  fn save(
    &self,
    document: FunFactDocument,
  ) -> impl Future<Output = Result<FunFactDocument, Self::Error>> + Send + '_;

  /// Find-or-create the document for `state_code` and append `funfacts` to
  /// its list as one operation. Returns the document as stored.
  fn append<'a>(
    &'a self,
    state_code: &'a str,
    funfacts: Vec<String>,
  ) -> impl Future<Output = Result<FunFactDocument, Self::Error>> + Send + 'a;
}
