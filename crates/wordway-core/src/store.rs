//! The `DictionaryStore` trait and the match set it produces.
//!
//! The trait is implemented by storage backends (e.g. `wordway-store-sqlite`).
//! The search pipeline and the scraper depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  pronunciation::{Pronunciation, PronunciationDetail},
  query::MatchQuery,
  relation::{IncludeWordRelation, SynonymsWordRelation},
  word::{NewWord, Sentence, Word, WordDetail},
};

// ─── Match set ───────────────────────────────────────────────────────────────

/// A word selected through an inclusion edge, with its owner loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMatch {
  pub owner:          Pronunciation,
  /// Synonym spellings of `owner`, in edge insertion order.
  pub owner_synonyms: Vec<String>,
  pub word:           WordDetail,
}

/// Raw output of [`DictionaryStore::resolve_matches`], before priorities are
/// attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
  /// Pronunciations whose spelling contains a keyword, in creation order.
  pub exact:     Vec<PronunciationDetail>,
  /// Pronunciations with a synonym edge to a keyword, in creation order.
  pub synonym:   Vec<PronunciationDetail>,
  /// Words with an inclusion edge to a keyword, ordered by owner creation
  /// then `target_code`.
  pub inclusion: Vec<InclusionMatch>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a word-way dictionary backend.
///
/// Searching is read-only. Writes come from the scraper only and are all
/// idempotent, so re-scraping a keyword never duplicates rows.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DictionaryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a pronunciation by id. Returns `None` if not found.
  fn get_pronunciation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Pronunciation>, Self::Error>> + Send + '_;

  /// Retrieve a pronunciation by its exact spelling.
  fn find_pronunciation<'a>(
    &'a self,
    spelling: &'a str,
  ) -> impl Future<Output = Result<Option<Pronunciation>, Self::Error>> + Send + 'a;

  /// All senses of a pronunciation, ordered by `target_code`.
  fn list_words(
    &self,
    pronunciation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Word>, Self::Error>> + Send + '_;

  /// Example sentences attached to a word, in insertion order.
  fn list_sentences(
    &self,
    word_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Sentence>, Self::Error>> + Send + '_;

  /// Run the three selection rules of `query` and eagerly load everything
  /// the merger needs, all inside a single read transaction.
  ///
  /// An unfiltered query yields every pronunciation in `exact` and nothing
  /// else.
  fn resolve_matches<'a>(
    &'a self,
    query: &'a MatchQuery,
  ) -> impl Future<Output = Result<MatchSet, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Return the pronunciation spelled `spelling`, creating it if absent.
  fn get_or_create_pronunciation<'a>(
    &'a self,
    spelling: &'a str,
  ) -> impl Future<Output = Result<Pronunciation, Self::Error>> + Send + 'a;

  /// Whether a word with this upstream `target_code` is already stored.
  fn word_exists(
    &self,
    target_code: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The stored sense with this upstream `target_code`, if any.
  fn find_word(
    &self,
    target_code: i64,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + '_;

  /// Persist a new sense. Returns `None` if `target_code` is already taken.
  fn add_word(
    &self,
    input: NewWord,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + '_;

  /// Record that the definition of `word_id` refers to `pronunciation_id`.
  /// Returns `None` if the edge already exists.
  fn add_include_relation(
    &self,
    word_id: Uuid,
    pronunciation_id: Uuid,
  ) -> impl Future<Output = Result<Option<IncludeWordRelation>, Self::Error>>
  + Send
  + '_;

  /// Record that `criteria_id` lists `related_id` as a synonym.
  /// Returns `None` if the edge already exists.
  fn add_synonym_relation(
    &self,
    criteria_id: Uuid,
    related_id: Uuid,
  ) -> impl Future<Output = Result<Option<SynonymsWordRelation>, Self::Error>>
  + Send
  + '_;

  /// Store an example sentence and attach it to `word_id`. If the word
  /// already has a sentence with the same text, that one is returned.
  fn add_sentence(
    &self,
    word_id: Uuid,
    sentence: String,
  ) -> impl Future<Output = Result<Sentence, Self::Error>> + Send + '_;

  /// Stamp `scraped_at` on a pronunciation.
  fn mark_scraped(
    &self,
    pronunciation_id: Uuid,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
