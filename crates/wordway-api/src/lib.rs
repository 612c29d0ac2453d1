//! JSON REST API for word-way.
//!
//! Exposes an axum [`Router`] backed by any
//! [`wordway_core::store::DictionaryStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", wordway_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod words;

use std::sync::Arc;

use axum::{Router, routing::get};
use wordway_core::{search::SearchService, store::DictionaryStore};

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DictionaryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/ping", get(ping))
    .route("/words", get(words::search::<S>))
    .with_state(SearchService::new(store))
}

/// `GET /ping` — liveness check.
async fn ping() -> &'static str { "pong" }
