//! Handlers for `/states/:code/funfact`.
//!
//! | Method   | Path | Body | Notes |
//! |----------|------|------|-------|
//! | `GET`    | `/states/:code/funfact` | — | One random fact |
//! | `POST`   | `/states/:code/funfact` | `{"funfacts":[...]}` | Create or append |
//! | `PATCH`  | `/states/:code/funfact` | `{"index":n,"funfact":"..."}` | 1-based overwrite |
//! | `DELETE` | `/states/:code/funfact` | `{"index":n}` | 1-based removal |
//!
//! Every handler resolves the state code before touching the store. Writes
//! respond with the stored document.

use axum::{
  Json,
  extract::{Path, State},
};
use rand::rngs::OsRng;
use serde_json::{Value, json};
use statefacts_core::{
  Error,
  fun_fact::FunFactDocument,
  state::StateRecord,
  store::FunFactStore,
  validate::{validate_fun_facts_payload, validate_index, validate_index_and_fact},
};

use crate::{ApiState, body::JsonBody, error::ApiError};

/// Load the document for `record`, failing when it is absent or empty.
async fn existing_facts<S>(
  store: &S,
  record: &StateRecord,
) -> Result<FunFactDocument, ApiError>
where
  S: FunFactStore,
{
  store
    .find_one(&record.code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .filter(FunFactDocument::has_facts)
    .ok_or_else(|| Error::NoFunFacts(record.name.clone()).into())
}

// ─── Random ───────────────────────────────────────────────────────────────────

/// `GET /states/:code/funfact`
pub async fn random<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let record = state.dataset.find_by_code(&code)?;
  let document = existing_facts(state.store.as_ref(), record).await?;

  let fact = document
    .random_fact(&mut OsRng)
    .ok_or_else(|| Error::NoFunFacts(record.name.clone()))?;
  Ok(Json(json!({ "funfact": fact })))
}

// ─── Create / append ──────────────────────────────────────────────────────────

/// `POST /states/:code/funfact` — creates the document on first use,
/// otherwise appends after the existing entries.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
  JsonBody(body): JsonBody,
) -> Result<Json<FunFactDocument>, ApiError>
where
  S: FunFactStore,
{
  let record = state.dataset.find_by_code(&code)?;
  let funfacts = validate_fun_facts_payload(&body)?;

  let document = state
    .store
    .append(&record.code, funfacts)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(
    state = %record.code,
    count = document.funfacts.len(),
    "fun facts appended"
  );
  Ok(Json(document))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /states/:code/funfact` — body: `{"index": n, "funfact": "..."}`.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
  JsonBody(body): JsonBody,
) -> Result<Json<FunFactDocument>, ApiError>
where
  S: FunFactStore,
{
  let record = state.dataset.find_by_code(&code)?;
  let (index, fact) = validate_index_and_fact(&body)?;

  let mut document = existing_facts(state.store.as_ref(), record).await?;
  document
    .replace_at(index, fact)
    .ok_or_else(|| Error::IndexOutOfRange(record.name.clone()))?;

  let document = state
    .store
    .save(document)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(state = %record.code, index = index.value(), "fun fact updated");
  Ok(Json(document))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /states/:code/funfact` — body: `{"index": n}`.
///
/// Removing the last entry keeps the document with an empty list.
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
  JsonBody(body): JsonBody,
) -> Result<Json<FunFactDocument>, ApiError>
where
  S: FunFactStore,
{
  let record = state.dataset.find_by_code(&code)?;
  let index = validate_index(&body)?;

  let mut document = existing_facts(state.store.as_ref(), record).await?;
  document
    .remove_at(index)
    .ok_or_else(|| Error::IndexOutOfRange(record.name.clone()))?;

  let document = state
    .store
    .save(document)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(
    state = %record.code,
    remaining = document.funfacts.len(),
    "fun fact removed"
  );
  Ok(Json(document))
}
