//! Keyword query accepted by the match resolver.

/// An ordered list of search keywords, each trimmed of surrounding
/// whitespace.
///
/// The two predicates below define the match rules that storage backends
/// must reproduce: pronunciations match the exact group by substring, while
/// the relation groups match their target spelling by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
  keywords: Vec<String>,
}

impl MatchQuery {
  pub fn new<I, K>(keywords: I) -> Self
  where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
  {
    Self {
      keywords: keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_owned())
        .collect(),
    }
  }

  pub fn keywords(&self) -> &[String] { &self.keywords }

  /// No keywords at all: the exact group lists every pronunciation and the
  /// relation groups are empty.
  pub fn is_unfiltered(&self) -> bool { self.keywords.is_empty() }

  /// Exact-group rule: `spelling` contains any keyword.
  pub fn contains_match(&self, spelling: &str) -> bool {
    self.is_unfiltered()
      || self.keywords.iter().any(|k| spelling.contains(k.as_str()))
  }

  /// Relation-group rule: `spelling` equals one of the keywords.
  pub fn exact_match(&self, spelling: &str) -> bool {
    self.keywords.iter().any(|k| k == spelling)
  }
}
