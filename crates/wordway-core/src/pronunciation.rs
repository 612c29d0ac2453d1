//! Pronunciation — the spelling that groups homographic senses.
//!
//! A pronunciation is identified logically by its spelling. Storage backends
//! enforce that with a unique constraint so the scraper's fetch-or-create is
//! race free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::word::WordDetail;

/// A phonetic spelling and the bookkeeping the scraper attaches to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
  pub pronunciation_id: Uuid,
  pub spelling:         String,
  pub created_at:       DateTime<Utc>,
  /// Set once the upstream dictionary has been queried for this spelling.
  pub scraped_at:       Option<DateTime<Utc>>,
}

/// A pronunciation with its senses and synonym spellings eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronunciationDetail {
  pub pronunciation:    Pronunciation,
  /// Every sense of the pronunciation, ordered by `target_code`.
  pub words:            Vec<WordDetail>,
  /// Spellings this pronunciation lists as synonyms, in edge insertion order.
  pub related_synonyms: Vec<String>,
}
