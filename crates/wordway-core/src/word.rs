//! Word — one sense of a pronunciation — and its example sentences.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Error;

// ─── Part of speech ──────────────────────────────────────────────────────────

/// The grammatical category of a sense.
///
/// The string form (serde and [`Display`]) is the value stored in the `part`
/// column and returned by the API.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WordPart {
  Noun,
  Pronoun,
  Numeral,
  Particle,
  Verb,
  Adjective,
  Determiner,
  Adverb,
  Interjection,
  Affix,
  DependentNoun,
  AuxiliaryVerb,
  AuxiliaryAdjective,
  Ending,
  Unit,
  /// The dictionary lists no part of speech (`품사 없음`), or it is unknown.
  #[default]
  None,
}

impl WordPart {
  /// Convert the Korean label used by the upstream dictionary.
  ///
  /// Unrecognised labels map to [`WordPart::None`].
  pub fn from_korean_label(label: &str) -> Self {
    match label.trim() {
      "명사" => Self::Noun,
      "대명사" => Self::Pronoun,
      "수사" => Self::Numeral,
      "조사" => Self::Particle,
      "동사" => Self::Verb,
      "형용사" => Self::Adjective,
      "관형사" => Self::Determiner,
      "부사" => Self::Adverb,
      "감탄사" => Self::Interjection,
      "접사" => Self::Affix,
      "의존 명사" | "의존명사" => Self::DependentNoun,
      "보조 동사" | "보조동사" => Self::AuxiliaryVerb,
      "보조 형용사" | "보조형용사" => Self::AuxiliaryAdjective,
      "어미" => Self::Ending,
      "단위" => Self::Unit,
      _ => Self::None,
    }
  }

  /// Parse the stored snake_case form.
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownWordPart(s.to_owned()))
  }
}

// ─── Word ────────────────────────────────────────────────────────────────────

/// A single dictionary sense. Never reparented once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  pub word_id:          Uuid,
  pub pronunciation_id: Uuid,
  /// Identifier assigned by the upstream dictionary; unique per sense.
  pub target_code:      i64,
  pub part:             WordPart,
  /// Definition text.
  pub contents:         String,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::DictionaryStore::add_word`].
#[derive(Debug, Clone)]
pub struct NewWord {
  pub pronunciation_id: Uuid,
  pub target_code:      i64,
  pub part:             WordPart,
  pub contents:         String,
}

/// A word with the spellings its definition refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDetail {
  pub word:                   Word,
  /// Inclusion targets, in edge insertion order.
  pub related_pronunciations: Vec<String>,
}

// ─── Sentence ────────────────────────────────────────────────────────────────

/// An example usage sentence attached to one or more words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
  pub sentence_id: Uuid,
  pub sentence:    String,
  pub created_at:  DateTime<Utc>,
}
