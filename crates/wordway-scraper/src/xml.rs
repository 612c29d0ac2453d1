//! Upstream XML response shapes.
//!
//! Only the elements the scraper reads are modelled; everything else in the
//! upstream `<channel>` is ignored. Repeated elements default to empty when
//! absent.

use serde::Deserialize;

use crate::Result;

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct SearchChannel {
  #[serde(default)]
  item: Vec<SearchItem>,
}

/// One headword returned by the `search` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchItem {
  /// Headword as spelled upstream, with `-` syllable and `^` space markers.
  pub word:  Option<String>,
  #[serde(default)]
  pub sense: Vec<SearchSense>,
}

/// One sense of a headword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchSense {
  pub target_code: Option<String>,
  /// Korean part-of-speech label, e.g. `동사`.
  pub pos:         Option<String>,
  pub definition:  Option<String>,
}

impl SearchSense {
  /// The numeric `target_code`, if present and well formed.
  pub fn code(&self) -> Option<i64> {
    self.target_code.as_deref()?.trim().parse().ok()
  }
}

/// Decode a `search` response body.
pub fn parse_search(body: &str) -> Result<Vec<SearchItem>> {
  let channel: SearchChannel = quick_xml::de::from_str(body)?;
  Ok(channel.item)
}

// ─── View ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ViewChannel {
  item: Option<ViewItem>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewItem {
  #[serde(rename = "senseInfo")]
  sense_info: Option<SenseInfo>,
}

/// Extra information about a single sense from the `view` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SenseInfo {
  #[serde(default)]
  pub example_info:  Vec<ExampleInfo>,
  #[serde(default)]
  pub relation_info: Vec<RelationInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExampleInfo {
  pub example: Option<String>,
}

/// A word related to the sense, e.g. a synonym or antonym.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationInfo {
  pub word: Option<String>,
  /// Korean relation label, e.g. `비슷한말` (synonym).
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

impl RelationInfo {
  pub const SYNONYM: &'static str = "비슷한말";

  pub fn is_synonym(&self) -> bool {
    self.kind.as_deref().map(str::trim) == Some(Self::SYNONYM)
  }
}

/// Decode a `view` response body. Returns `None` when the upstream has no
/// sense information for the requested code.
pub fn parse_view(body: &str) -> Result<Option<SenseInfo>> {
  let channel: ViewChannel = quick_xml::de::from_str(body)?;
  Ok(channel.item.and_then(|item| item.sense_info))
}
