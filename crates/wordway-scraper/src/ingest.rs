//! Writing upstream search results into a store.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wordway_core::{
  store::DictionaryStore,
  word::{NewWord, Word, WordPart},
};

use crate::{
  Error, Result,
  source::DictionarySource,
  tokenize::{Tokenizer, shared_tokenizer},
  xml::SearchItem,
};

/// Normalise an upstream headword: `-` marks syllable boundaries and is
/// dropped, `^` marks a space.
pub fn normalize_spelling(raw: &str) -> String {
  raw.replace('-', "").replace('^', " ")
}

/// Scrapes keywords from a [`DictionarySource`] into a [`DictionaryStore`].
pub struct Ingester<S, D> {
  store:     Arc<S>,
  source:    D,
  tokenizer: Arc<dyn Tokenizer>,
}

impl<S: DictionaryStore, D: DictionarySource> Ingester<S, D> {
  /// Ingester using the process-wide [`shared_tokenizer`].
  pub fn new(store: Arc<S>, source: D) -> Result<Self> {
    Ok(Self::with_tokenizer(store, source, shared_tokenizer()?))
  }

  pub fn with_tokenizer(store: Arc<S>, source: D, tokenizer: Arc<dyn Tokenizer>) -> Self {
    Self { store, source, tokenizer }
  }

  /// Search upstream for `target` and store every headword it returns,
  /// along with senses, inclusion edges, example sentences and synonym
  /// edges.
  ///
  /// Senses whose `target_code` is already stored keep their row, but their
  /// edges and examples are written again; every write is idempotent, so a
  /// later scrape fills in whatever an earlier failed one missed. Returns
  /// the id of the pronunciation spelled exactly `target`, if upstream
  /// returned one.
  pub async fn save_word(&self, target: &str) -> Result<Option<Uuid>> {
    let items = self.source.search(target).await?;
    debug!(keyword = target, items = items.len(), "upstream search returned");

    let mut exact = None;
    let mut touched: Vec<Uuid> = Vec::new();
    for item in &items {
      let Some(pronunciation_id) = self.save_item(item).await? else {
        continue;
      };
      if item.word.as_deref().map(normalize_spelling).as_deref() == Some(target) {
        exact = Some(pronunciation_id);
      }
      if !touched.contains(&pronunciation_id) {
        touched.push(pronunciation_id);
      }
    }

    let now = Utc::now();
    for id in &touched {
      self.store.mark_scraped(*id, now).await.map_err(Error::store)?;
    }

    info!(keyword = target, pronunciations = touched.len(), "scrape complete");
    Ok(exact)
  }

  /// Store one headword and its senses. Returns `None` for items without a
  /// headword.
  async fn save_item(&self, item: &SearchItem) -> Result<Option<Uuid>> {
    let Some(raw) = item.word.as_deref() else {
      return Ok(None);
    };
    let spelling = normalize_spelling(raw);
    info!(spelling = %spelling, "saving pronunciation");

    let pronunciation = self
      .store
      .get_or_create_pronunciation(&spelling)
      .await
      .map_err(Error::store)?;

    for sense in &item.sense {
      let Some(target_code) = sense.code() else {
        warn!(
          spelling = %spelling,
          target_code = ?sense.target_code,
          "sense without a valid target code"
        );
        continue;
      };
      let part = sense
        .pos
        .as_deref()
        .map(WordPart::from_korean_label)
        .unwrap_or_default();
      let new = NewWord {
        pronunciation_id: pronunciation.pronunciation_id,
        target_code,
        part,
        contents: sense.definition.clone().unwrap_or_default(),
      };
      let word = match self.store.add_word(new).await.map_err(Error::store)? {
        Some(word) => word,
        None => {
          debug!(target_code, "word already stored");
          match self.store.find_word(target_code).await.map_err(Error::store)? {
            Some(word) => word,
            None => continue,
          }
        }
      };

      self.save_include_words(&word).await?;
      self.save_sense_info(&word).await?;
    }

    Ok(Some(pronunciation.pronunciation_id))
  }

  /// Link `word` to the pronunciation of every content token of its
  /// definition.
  async fn save_include_words(&self, word: &Word) -> Result<()> {
    for token in self.tokenizer.tokenize(&word.contents)? {
      if !token.part.is_content() {
        debug!(token = %token.text, part = ?token.part, "skipping token");
        continue;
      }
      let included = self
        .store
        .get_or_create_pronunciation(&token.text)
        .await
        .map_err(Error::store)?;
      self
        .store
        .add_include_relation(word.word_id, included.pronunciation_id)
        .await
        .map_err(Error::store)?;
    }
    Ok(())
  }

  /// Store example sentences and synonym edges from the `view` endpoint.
  /// Upstream failures are logged and skipped.
  async fn save_sense_info(&self, word: &Word) -> Result<()> {
    let info = match self.source.view(word.target_code).await {
      Ok(Some(info)) => info,
      Ok(None) => return Ok(()),
      Err(e) => {
        warn!(target_code = word.target_code, error = %e, "view request failed; examples and synonyms left for the next scrape");
        return Ok(());
      }
    };

    for example in info.example_info.iter().filter_map(|e| e.example.as_deref()) {
      let example = example.trim();
      if example.is_empty() {
        continue;
      }
      self
        .store
        .add_sentence(word.word_id, example.to_string())
        .await
        .map_err(Error::store)?;
    }

    for relation in info.relation_info.iter().filter(|r| r.is_synonym()) {
      let Some(raw) = relation.word.as_deref() else {
        continue;
      };
      let related = self
        .store
        .get_or_create_pronunciation(&normalize_spelling(raw))
        .await
        .map_err(Error::store)?;
      if related.pronunciation_id == word.pronunciation_id {
        continue;
      }
      self
        .store
        .add_synonym_relation(word.pronunciation_id, related.pronunciation_id)
        .await
        .map_err(Error::store)?;
    }
    Ok(())
  }
}
