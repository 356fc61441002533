//! Loosely-typed JSON request bodies.
//!
//! Fun-fact bodies are validated field by field in `statefacts-core`, so the
//! extractor only turns the raw bytes into a [`serde_json::Value`]. The
//! `Content-Type` header is not consulted, and an empty body reads as `{}` so
//! that a missing body reports the same missing-field message as `{}`.

use axum::{
  body::Bytes,
  extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::ApiError;

pub const MALFORMED_BODY: &str = "Request body must be valid JSON";

/// A request body parsed as arbitrary JSON.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    parse(&bytes).map(JsonBody)
  }
}

fn parse(bytes: &[u8]) -> Result<Value, ApiError> {
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Object(Default::default()));
  }
  serde_json::from_slice(bytes)
    .map_err(|_| ApiError::BadRequest(MALFORMED_BODY.to_owned()))
}
