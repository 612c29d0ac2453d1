//! Result merging — candidate groups to the public response shape.
//!
//! Pronunciation-level candidates (priorities 0 and 1) become one record
//! each, nesting every sense of the pronunciation. Word-level candidates
//! (priority 2) become one record per owning pronunciation, nesting only the
//! matched senses. The concatenation is then deduplicated by pronunciation
//! id, keeping the first (best-priority) record.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  pronunciation::PronunciationDetail,
  resolve::{Candidate, CandidateGroups, Priority},
  store::InclusionMatch,
  word::{WordDetail, WordPart},
};

// ─── Records ─────────────────────────────────────────────────────────────────

/// A serialised sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
  pub id:                     Uuid,
  pub contents:               String,
  pub part:                   WordPart,
  /// Spellings the definition refers to.
  pub related_pronunciations: Vec<String>,
}

impl From<WordDetail> for WordRecord {
  fn from(detail: WordDetail) -> Self {
    Self {
      id:                     detail.word.word_id,
      contents:               detail.word.contents,
      part:                   detail.word.part,
      related_pronunciations: detail.related_pronunciations,
    }
  }
}

/// One entry of the search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
  /// Pronunciation id.
  pub id:            Uuid,
  pub pronunciation: String,
  /// More than one entry means homographs.
  pub words:         Vec<WordRecord>,
  /// Synonym spellings.
  pub related_words: Vec<String>,
  pub priority:      Priority,
}

impl SearchRecord {
  fn from_detail(detail: PronunciationDetail, priority: Priority) -> Self {
    Self {
      id: detail.pronunciation.pronunciation_id,
      pronunciation: detail.pronunciation.spelling,
      words: detail.words.into_iter().map(WordRecord::from).collect(),
      related_words: detail.related_synonyms,
      priority,
    }
  }
}

// ─── Merge ───────────────────────────────────────────────────────────────────

/// Merge the candidate groups into the ordered, deduplicated response.
///
/// No two returned records share a pronunciation id, and priorities never
/// decrease going down the list.
pub fn merge(groups: CandidateGroups) -> Vec<SearchRecord> {
  let CandidateGroups { exact, synonym, inclusion } = groups;

  let pronunciation_level = exact
    .into_iter()
    .chain(synonym)
    .map(|c| SearchRecord::from_detail(c.entity, c.priority));
  let word_level = fold_inclusions(inclusion);

  let mut seen = HashSet::new();
  pronunciation_level
    .chain(word_level)
    .filter(|record| seen.insert(record.id))
    .collect()
}

/// Group inclusion matches by owning pronunciation, preserving first-seen
/// order of owners and of words within an owner.
fn fold_inclusions(
  candidates: Vec<Candidate<InclusionMatch>>,
) -> Vec<SearchRecord> {
  let mut records: Vec<SearchRecord> = Vec::new();
  let mut by_owner: HashMap<Uuid, usize> = HashMap::new();

  for Candidate { entity, priority } in candidates {
    let InclusionMatch { owner, owner_synonyms, word } = entity;
    let word = WordRecord::from(word);

    match by_owner.get(&owner.pronunciation_id) {
      Some(&idx) => {
        let words = &mut records[idx].words;
        if !words.iter().any(|w| w.id == word.id) {
          words.push(word);
        }
      }
      None => {
        by_owner.insert(owner.pronunciation_id, records.len());
        records.push(SearchRecord {
          id: owner.pronunciation_id,
          pronunciation: owner.spelling,
          words: vec![word],
          related_words: owner_synonyms,
          priority,
        });
      }
    }
  }

  records
}
