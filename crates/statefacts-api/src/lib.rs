//! JSON REST API for US state reference data and fun facts.
//!
//! Exposes an axum [`Router`] backed by the static [`Dataset`] and any
//! [`statefacts_core::store::FunFactStore`]. Static pages, CORS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = statefacts_api::api_router(dataset, store).merge(other_routes);
//! ```

pub mod body;
pub mod error;
pub mod fun_facts;
pub mod states;

use std::sync::Arc;

use axum::{Router, routing::get};
use statefacts_core::{state::Dataset, store::FunFactStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub dataset: Arc<Dataset>,
  pub store:   Arc<S>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { dataset: self.dataset.clone(), store: self.store.clone() }
  }
}

/// Build a fully-materialised API router over `dataset` and `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(dataset: Arc<Dataset>, store: Arc<S>) -> Router<()>
where
  S: FunFactStore + 'static,
{
  Router::new()
    // Merged views
    .route("/states", get(states::list::<S>))
    .route("/states/{code}", get(states::get_one::<S>))
    // Static fields
    .route("/states/{code}/capital", get(states::capital::<S>))
    .route("/states/{code}/nickname", get(states::nickname::<S>))
    .route("/states/{code}/population", get(states::population::<S>))
    .route("/states/{code}/admission", get(states::admission::<S>))
    // Fun facts
    .route(
      "/states/{code}/funfact",
      get(fun_facts::random::<S>)
        .post(fun_facts::create::<S>)
        .patch(fun_facts::update::<S>)
        .delete(fun_facts::remove::<S>),
    )
    .with_state(ApiState { dataset, store })
}
