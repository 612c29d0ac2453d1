//! word-way server: configuration and the top-level router.
//!
//! The `word-way` binary in `main.rs` is a thin shell over this crate so the
//! wiring can be tested without binding a socket.

pub mod settings;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use wordway_core::store::DictionaryStore;

pub use settings::ServerConfig;

/// Mount the JSON API under `/api` with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: DictionaryStore + 'static,
{
  Router::new()
    .nest("/api", wordway_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;
  use wordway_store_sqlite::SqliteStore;

  use super::*;

  async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
  }

  async fn test_app() -> Router {
    app(Arc::new(SqliteStore::open_in_memory().await.unwrap()))
  }

  #[tokio::test]
  async fn ping_is_mounted_under_api() {
    let (status, body) = get(test_app().await, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "pong");
  }

  #[tokio::test]
  async fn words_is_mounted_under_api() {
    let (status, body) = get(test_app().await, "/api/words?keywords=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"data":[]}"#);
  }

  #[tokio::test]
  async fn unmounted_paths_are_not_found() {
    let (status, _) = get(test_app().await, "/ping").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
