//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with fixed microsecond precision. UUIDs
//! are hyphenated lowercase strings. Rows are first read into `Raw*` structs
//! inside the connection closure and decoded afterwards, so decode failures
//! surface as [`Error`] rather than as SQLite errors.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use wordway_core::{
  pronunciation::{Pronunciation, PronunciationDetail},
  store::InclusionMatch,
  word::{Sentence, Word, WordDetail, WordPart},
};

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── WordPart ────────────────────────────────────────────────────────────────

pub fn encode_part(part: WordPart) -> &'static str { part.into() }

pub fn decode_part(s: &str) -> Result<WordPart> { Ok(WordPart::parse(s)?) }

// ─── Keywords ────────────────────────────────────────────────────────────────

/// A JSON array of keywords, bound as one parameter and read back with
/// `json_each`.
pub fn encode_keywords(keywords: &[String]) -> String {
  serde_json::Value::from(keywords.to_vec()).to_string()
}

// ─── Column lists ────────────────────────────────────────────────────────────

/// Columns read by [`RawPronunciation::from_row`], aliased `p`.
pub const PRONUNCIATION_COLUMNS: &str =
  "p.pronunciation_id, p.spelling, p.created_at, p.scraped_at";

/// Columns read by [`RawWord::from_row`], aliased `w`.
pub const WORD_COLUMNS: &str = "w.word_id, w.pronunciation_id, w.target_code, \
                                w.part, w.contents, w.created_at";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `pronunciations` row.
pub struct RawPronunciation {
  pub pronunciation_id: String,
  pub spelling:         String,
  pub created_at:       String,
  pub scraped_at:       Option<String>,
}

impl RawPronunciation {
  /// Read [`PRONUNCIATION_COLUMNS`] starting at column `offset`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      pronunciation_id: row.get(offset)?,
      spelling:         row.get(offset + 1)?,
      created_at:       row.get(offset + 2)?,
      scraped_at:       row.get(offset + 3)?,
    })
  }

  pub fn into_pronunciation(self) -> Result<Pronunciation> {
    Ok(Pronunciation {
      pronunciation_id: decode_uuid(&self.pronunciation_id)?,
      spelling:         self.spelling,
      created_at:       decode_dt(&self.created_at)?,
      scraped_at:       self.scraped_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw strings read directly from a `words` row.
pub struct RawWord {
  pub word_id:          String,
  pub pronunciation_id: String,
  pub target_code:      i64,
  pub part:             String,
  pub contents:         String,
  pub created_at:       String,
}

impl RawWord {
  /// Read [`WORD_COLUMNS`] starting at column `offset`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      word_id:          row.get(offset)?,
      pronunciation_id: row.get(offset + 1)?,
      target_code:      row.get(offset + 2)?,
      part:             row.get(offset + 3)?,
      contents:         row.get(offset + 4)?,
      created_at:       row.get(offset + 5)?,
    })
  }

  pub fn into_word(self) -> Result<Word> {
    Ok(Word {
      word_id:          decode_uuid(&self.word_id)?,
      pronunciation_id: decode_uuid(&self.pronunciation_id)?,
      target_code:      self.target_code,
      part:             decode_part(&self.part)?,
      contents:         self.contents,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `sentences` row.
pub struct RawSentence {
  pub sentence_id: String,
  pub sentence:    String,
  pub created_at:  String,
}

impl RawSentence {
  /// Read `sentence_id, sentence, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      sentence_id: row.get(0)?,
      sentence:    row.get(1)?,
      created_at:  row.get(2)?,
    })
  }

  pub fn into_sentence(self) -> Result<Sentence> {
    Ok(Sentence {
      sentence_id: decode_uuid(&self.sentence_id)?,
      sentence:    self.sentence,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// A word row plus the spellings of its inclusion edges.
pub struct RawWordDetail {
  pub word:                   RawWord,
  pub related_pronunciations: Vec<String>,
}

impl RawWordDetail {
  pub fn into_detail(self) -> Result<WordDetail> {
    Ok(WordDetail {
      word:                   self.word.into_word()?,
      related_pronunciations: self.related_pronunciations,
    })
  }
}

/// A pronunciation row plus its eagerly-loaded words and synonym spellings.
pub struct RawPronunciationDetail {
  pub pronunciation:    RawPronunciation,
  pub words:            Vec<RawWordDetail>,
  pub related_synonyms: Vec<String>,
}

impl RawPronunciationDetail {
  pub fn into_detail(self) -> Result<PronunciationDetail> {
    Ok(PronunciationDetail {
      pronunciation:    self.pronunciation.into_pronunciation()?,
      words:            self
        .words
        .into_iter()
        .map(RawWordDetail::into_detail)
        .collect::<Result<_>>()?,
      related_synonyms: self.related_synonyms,
    })
  }
}

/// An inclusion-matched word with its owning pronunciation.
pub struct RawInclusionMatch {
  pub owner:          RawPronunciation,
  pub owner_synonyms: Vec<String>,
  pub word:           RawWordDetail,
}

impl RawInclusionMatch {
  pub fn into_match(self) -> Result<InclusionMatch> {
    Ok(InclusionMatch {
      owner:          self.owner.into_pronunciation()?,
      owner_synonyms: self.owner_synonyms,
      word:           self.word.into_detail()?,
    })
  }
}
