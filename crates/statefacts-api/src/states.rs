//! Handlers for the read-only `/states` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/states` | Optional `?contig=true\|false`; anything else is ignored |
//! | `GET`  | `/states/:code` | Merged view; 404 on unknown code |
//! | `GET`  | `/states/:code/capital` | `{"state","capital"}` |
//! | `GET`  | `/states/:code/nickname` | `{"state","nickname"}` |
//! | `GET`  | `/states/:code/population` | `{"state","population"}`, comma-grouped |
//! | `GET`  | `/states/:code/admission` | `{"state","admitted"}` |
//!
//! The four field endpoints read only the static dataset.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde_json::{Value, json};
use statefacts_core::{
  state::ContigFilter,
  store::FunFactStore,
  view::{MergedStateView, merge_all},
};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// The single `contig` value in a query string. Absent and repeated keys
/// both yield `None`, so neither can fail the request.
fn contig_param(pairs: &[(String, String)]) -> Option<&str> {
  let mut values = pairs.iter().filter(|(k, _)| k == "contig");
  match (values.next(), values.next()) {
    (Some((_, v)), None) => Some(v.as_str()),
    _ => None,
  }
}

/// `GET /states[?contig=true|false]`
///
/// `"true"` keeps the 48 contiguous states, `"false"` keeps AK and HI.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<MergedStateView>>, ApiError>
where
  S: FunFactStore,
{
  let filter = ContigFilter::from_param(contig_param(&pairs));

  let documents = state
    .store
    .find_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(merge_all(state.dataset.filtered(filter), &documents)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /states/:code`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<MergedStateView>, ApiError>
where
  S: FunFactStore,
{
  let record = state.dataset.find_by_code(&code)?;

  let document = state
    .store
    .find_one(&record.code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(MergedStateView::merge(record, document.as_ref())))
}

// ─── Static fields ────────────────────────────────────────────────────────────

/// `GET /states/:code/capital`
pub async fn capital<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let record = state.dataset.find_by_code(&code)?;
  Ok(Json(json!({ "state": record.name, "capital": record.capital })))
}

/// `GET /states/:code/nickname`
pub async fn nickname<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let record = state.dataset.find_by_code(&code)?;
  Ok(Json(json!({ "state": record.name, "nickname": record.nickname })))
}

/// `GET /states/:code/population`
pub async fn population<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let record = state.dataset.find_by_code(&code)?;
  Ok(Json(json!({
    "state": record.name,
    "population": record.formatted_population(),
  })))
}

/// `GET /states/:code/admission`
pub async fn admission<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let record = state.dataset.find_by_code(&code)?;
  Ok(Json(json!({ "state": record.name, "admitted": record.admission_date })))
}
