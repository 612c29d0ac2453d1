//! The search entry point.

use std::sync::Arc;

use crate::{
  merge::{SearchRecord, merge},
  query::MatchQuery,
  resolve::resolve,
  store::DictionaryStore,
};

/// Orchestrates match resolution and result merging over a store.
///
/// Read-only; cloning is cheap.
pub struct SearchService<S> {
  store: Arc<S>,
}

impl<S> Clone for SearchService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DictionaryStore> SearchService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Search for `keywords` (trimmed before matching). An empty list lists
  /// every pronunciation at priority 0.
  pub async fn search<I, K>(
    &self,
    keywords: I,
  ) -> Result<Vec<SearchRecord>, S::Error>
  where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
  {
    let query = MatchQuery::new(keywords);
    let groups = resolve(self.store.as_ref(), &query).await?;
    let records = merge(groups);
    tracing::debug!(
      keywords = ?query.keywords(),
      results = records.len(),
      "search complete"
    );
    Ok(records)
  }
}
