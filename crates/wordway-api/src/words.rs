//! Handler for `GET /words`.
//!
//! `keywords` may be repeated: `/words?keywords=떼다&keywords=사과`. Other
//! parameters are ignored. Without any `keywords` every pronunciation is
//! listed.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use wordway_core::{
  merge::SearchRecord, search::SearchService, store::DictionaryStore,
};

use crate::error::ApiError;

/// Response body: `{"data": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
  pub data: Vec<SearchRecord>,
}

/// `GET /words[?keywords=...][&keywords=...]`
pub async fn search<S>(
  State(service): State<SearchService<S>>,
  Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: DictionaryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let keywords = params
    .into_iter()
    .filter(|(key, _)| key == "keywords")
    .map(|(_, value)| value);

  let data = service
    .search(keywords)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(SearchResponse { data }))
}
