//! Core types and trait definitions for the state fun-facts service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the static state dataset, the persisted fun-fact document shape, the
//! validation rules applied to request bodies, and the [`store::FunFactStore`]
//! abstraction that storage backends implement.

pub mod error;
pub mod fun_fact;
pub mod state;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
