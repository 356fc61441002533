//! HTTP server assembly for the state fun-facts API.
//!
//! Wraps the [`statefacts_api`] router with the index page, the
//! content-negotiated 404 fallback, request tracing and CORS. A trailing
//! slash is trimmed before routing, so `/states/` and `/states/ga/` resolve
//! like their bare forms.

pub mod negotiate;

use std::path::{Path, PathBuf};

use axum::{
  Json, Router,
  http::{HeaderMap, StatusCode, header},
  response::{Html, IntoResponse, Response},
  routing::get,
};
use serde::Deserialize;
use serde_json::json;
use statefacts_api::ApiState;
use statefacts_core::store::FunFactStore;
use tower::Layer as _;
use tower_http::{
  cors::CorsLayer,
  normalize_path::{NormalizePath, NormalizePathLayer},
  trace::TraceLayer,
};

use negotiate::NotFoundFormat;

const INDEX_HTML: &str = include_str!("../public/index.html");
const NOT_FOUND_HTML: &str = include_str!("../public/404.html");
const NOT_FOUND_TEXT: &str = "404 Not Found";

/// Port used when neither the config file, `STATEFACTS_PORT` nor `PORT` set one.
pub const DEFAULT_PORT: u16 = 3500;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STATEFACTS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Replacement for the embedded dataset; a JSON array of state records.
  pub dataset_path: Option<PathBuf>,
  /// Attach a permissive CORS layer.
  pub cors:         bool,
}

impl ServerConfig {
  /// Layer defaults, the optional file at `path`, then the environment.
  ///
  /// The bare `PORT` variable is honoured as a default so that hosting
  /// platforms which set it work without extra configuration.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let default_port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);

    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", i64::from(default_port))?
      .set_default("store_path", "statefacts.db")?
      .set_default("cors", true)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("STATEFACTS"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The served application: the router behind trailing-slash trimming.
pub type App = NormalizePath<Router>;

/// Build the complete application.
pub fn router<S>(state: ApiState<S>, cors: bool) -> App
where
  S: FunFactStore + 'static,
{
  let mut router = statefacts_api::api_router(state.dataset, state.store)
    .route("/", get(index))
    .fallback(not_found)
    .method_not_allowed_fallback(not_found)
    .layer(TraceLayer::new_for_http());

  if cors {
    router = router.layer(CorsLayer::permissive());
  }

  NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn index() -> Html<&'static str> { Html(INDEX_HTML) }

/// 404 for anything the API does not route, shaped by the `Accept` header.
async fn not_found(headers: HeaderMap) -> Response {
  let accept = headers
    .get(header::ACCEPT)
    .and_then(|v| v.to_str().ok());

  match NotFoundFormat::negotiate(accept) {
    NotFoundFormat::Html => (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response(),
    NotFoundFormat::Json => {
      (StatusCode::NOT_FOUND, Json(json!({ "error": NOT_FOUND_TEXT }))).into_response()
    }
    NotFoundFormat::Text => (
      StatusCode::NOT_FOUND,
      [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
      NOT_FOUND_TEXT,
    )
      .into_response(),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{body::Body, http::Request};
  use statefacts_core::state::Dataset;
  use statefacts_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn app(cors: bool) -> App {
    let state = ApiState {
      dataset: Arc::new(Dataset::embedded().unwrap()),
      store:   Arc::new(SqliteStore::open_in_memory().await.unwrap()),
    };
    router(state, cors)
  }

  async fn oneshot(
    app:     App,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn content_type(resp: &Response) -> String {
    resp
      .headers()
      .get(header::CONTENT_TYPE)
      .unwrap()
      .to_str()
      .unwrap()
      .to_owned()
  }

  // ── Index ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_serves_index_page() {
    let resp = oneshot(app(true).await, "GET", "/", vec![]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/html"));
    assert!(body_text(resp).await.contains("/states"));
  }

  #[tokio::test]
  async fn api_routes_are_mounted() {
    let resp = oneshot(app(true).await, "GET", "/states/ga/capital", vec![]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value =
      serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body, json!({ "state": "Georgia", "capital": "Atlanta" }));
  }

  // ── Trailing slashes ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn trailing_slash_is_trimmed_before_routing() {
    let resp = oneshot(app(true).await, "GET", "/states/", vec![]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value =
      serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 50);

    let resp = oneshot(app(true).await, "GET", "/states/ga/", vec![]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value =
      serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body["code"], "GA");
  }

  #[tokio::test]
  async fn root_keeps_its_slash() {
    let resp = oneshot(app(true).await, "GET", "/", vec![]).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── 404 negotiation ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_route_without_accept_is_html() {
    let resp = oneshot(app(true).await, "GET", "/nope", vec![]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(content_type(&resp).starts_with("text/html"));
    assert!(body_text(resp).await.contains("404"));
  }

  #[tokio::test]
  async fn unknown_route_for_json_client_is_json() {
    let resp = oneshot(
      app(true).await,
      "GET",
      "/nope",
      vec![(header::ACCEPT, "application/json")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, r#"{"error":"404 Not Found"}"#);
  }

  #[tokio::test]
  async fn unknown_route_for_other_clients_is_text() {
    let resp = oneshot(
      app(true).await,
      "GET",
      "/states/ga/flag",
      vec![(header::ACCEPT, "image/png")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(content_type(&resp).starts_with("text/plain"));
    assert_eq!(body_text(resp).await, "404 Not Found");
  }

  #[tokio::test]
  async fn unsupported_method_on_known_path_is_404() {
    let resp = oneshot(
      app(true).await,
      "PUT",
      "/states/ga/funfact",
      vec![(header::ACCEPT, "application/json")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── CORS ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn cors_header_present_when_enabled() {
    let resp = oneshot(
      app(true).await,
      "GET",
      "/states/ga",
      vec![(header::ORIGIN, "https://example.com")],
    )
    .await;
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn cors_header_absent_when_disabled() {
    let resp = oneshot(
      app(false).await,
      "GET",
      "/states/ga",
      vec![(header::ORIGIN, "https://example.com")],
    )
    .await;
    assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn config_file_values_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      "host = \"127.0.0.1\"\nport = 8123\nstore_path = \"/tmp/x.db\"\ncors = false\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:8123");
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/x.db"));
    assert!(!cfg.cors);
    assert!(cfg.dataset_path.is_none());
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/facts.db")),
      PathBuf::from(home).join("facts.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs/facts.db")), PathBuf::from("/abs/facts.db"));
  }
}
