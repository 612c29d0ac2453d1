//! Match resolution — keywords to three priority-tagged candidate groups.
//!
//! | Priority | Group     | Rule |
//! |----------|-----------|------|
//! | 0        | exact     | pronunciation spelling contains a keyword |
//! | 1        | synonym   | pronunciation has a synonym edge to a keyword's exact spelling |
//! | 2        | inclusion | word has an inclusion edge to a keyword's exact spelling |
//!
//! The substring / equality asymmetry between group 0 and groups 1–2 is
//! intentional and must not be normalised.

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  pronunciation::PronunciationDetail,
  query::MatchQuery,
  store::{DictionaryStore, InclusionMatch, MatchSet},
};

// ─── Priority ────────────────────────────────────────────────────────────────

/// Rank of a match class; lower is better. Serialised as its integer value.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
  Exact     = 0,
  Synonym   = 1,
  Inclusion = 2,
}

impl From<Priority> for u8 {
  fn from(p: Priority) -> Self { p as u8 }
}

impl TryFrom<u8> for Priority {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Exact),
      1 => Ok(Self::Synonym),
      2 => Ok(Self::Inclusion),
      other => Err(Error::UnknownPriority(other)),
    }
  }
}

// ─── Candidates ──────────────────────────────────────────────────────────────

/// An entity selected by one of the rules, tagged with that rule's priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
  pub entity:   T,
  pub priority: Priority,
}

impl<T> Candidate<T> {
  fn tagged(priority: Priority) -> impl Fn(T) -> Self {
    move |entity| Self { entity, priority }
  }
}

/// The three candidate groups, each in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateGroups {
  pub exact:     Vec<Candidate<PronunciationDetail>>,
  pub synonym:   Vec<Candidate<PronunciationDetail>>,
  pub inclusion: Vec<Candidate<InclusionMatch>>,
}

impl From<MatchSet> for CandidateGroups {
  fn from(set: MatchSet) -> Self {
    Self {
      exact:     set
        .exact
        .into_iter()
        .map(Candidate::tagged(Priority::Exact))
        .collect(),
      synonym:   set
        .synonym
        .into_iter()
        .map(Candidate::tagged(Priority::Synonym))
        .collect(),
      inclusion: set
        .inclusion
        .into_iter()
        .map(Candidate::tagged(Priority::Inclusion))
        .collect(),
    }
  }
}

/// Resolve `query` against `store`. Store errors propagate unchanged.
pub async fn resolve<S>(
  store: &S,
  query: &MatchQuery,
) -> Result<CandidateGroups, S::Error>
where
  S: DictionaryStore,
{
  let set = store.resolve_matches(query).await?;
  tracing::debug!(
    exact = set.exact.len(),
    synonym = set.synonym.len(),
    inclusion = set.inclusion.len(),
    "resolved match candidates"
  );
  Ok(CandidateGroups::from(set))
}
