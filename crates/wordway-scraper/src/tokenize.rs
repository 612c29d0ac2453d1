//! Splitting definitions into tagged tokens.
//!
//! The scraper links a word to every content token of its definition. Which
//! tokens count as content is decided by [`TokenPart::is_content`].

use std::{
  borrow::Cow,
  sync::{Arc, OnceLock},
};

use lindera::{dictionary::load_dictionary, mode::Mode, segmenter::Segmenter};

use crate::{Error, Result};

/// Coarse morphological tag of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPart {
  Noun,
  Verb,
  Adjective,
  Adverb,
  Determiner,
  Interjection,
  /// Particle attached to a noun (조사).
  Josa,
  /// Inflectional ending (어미).
  Eomi,
  /// Pre-final ending (선어말어미).
  PreEomi,
  Suffix,
  Punctuation,
  Number,
  /// Latin-script word.
  Alpha,
  /// Other non-Hangul script, e.g. Hanja.
  Foreign,
  Unknown,
}

impl TokenPart {
  /// Map a mecab-ko-dic part-of-speech tag (`NNG`, `VV`, `JKO`, ...).
  ///
  /// Compound tags such as `VV+EP` are classified by their first element.
  pub fn from_ko_dic_tag(tag: &str) -> Self {
    let head = tag.split('+').next().unwrap_or_default();
    match head {
      "NNG" | "NNP" | "NNB" | "NNBC" | "NR" | "NP" | "XR" => Self::Noun,
      "VV" | "VX" => Self::Verb,
      "VA" | "VCN" => Self::Adjective,
      "MAG" | "MAJ" => Self::Adverb,
      "MM" => Self::Determiner,
      "IC" => Self::Interjection,
      "VCP" | "JX" | "JC" => Self::Josa,
      t if t.starts_with("JK") => Self::Josa,
      "EP" => Self::PreEomi,
      t if t.starts_with('E') => Self::Eomi,
      t if t.starts_with("XS") || t == "XPN" => Self::Suffix,
      "SF" | "SE" | "SSO" | "SSC" | "SC" | "SY" | "SP" => Self::Punctuation,
      "SN" => Self::Number,
      "SL" => Self::Alpha,
      "SH" => Self::Foreign,
      _ => Self::Unknown,
    }
  }

  /// Whether a token with this tag becomes an inclusion edge.
  pub fn is_content(self) -> bool {
    !matches!(
      self,
      Self::Josa
        | Self::Eomi
        | Self::PreEomi
        | Self::Suffix
        | Self::Punctuation
        | Self::Number
        | Self::Alpha
        | Self::Foreign
    )
  }

  fn is_predicate(self) -> bool { matches!(self, Self::Verb | Self::Adjective) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  /// Surface form, or the `-다` dictionary form for verbs and adjectives.
  pub text: String,
  pub part: TokenPart,
}

pub trait Tokenizer: Send + Sync {
  /// Split `text` into tokens in reading order. Whitespace is dropped.
  fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// The process-wide tokenizer, built on first use.
pub fn shared_tokenizer() -> Result<Arc<dyn Tokenizer>> {
  static SHARED: OnceLock<Arc<dyn Tokenizer>> = OnceLock::new();
  if let Some(tokenizer) = SHARED.get() {
    return Ok(Arc::clone(tokenizer));
  }
  let tokenizer: Arc<dyn Tokenizer> = Arc::new(KoreanTokenizer::new()?);
  Ok(Arc::clone(SHARED.get_or_init(|| tokenizer)))
}

// ─── Korean tokenizer ────────────────────────────────────────────────────────

/// Morphological tokenizer over the embedded mecab-ko-dic dictionary.
pub struct KoreanTokenizer {
  inner: Segmenter,
}

impl KoreanTokenizer {
  pub fn new() -> Result<Self> {
    let dictionary = load_dictionary("embedded://ko-dic")
      .map_err(|e| Error::Tokenizer(format!("failed to load ko-dic: {e}")))?;
    let inner = Segmenter::new(Mode::Normal, dictionary, None);
    Ok(Self { inner })
  }
}

/// Dictionary form of a ko-dic entry: the first morpheme of an inflected
/// entry's expression (`가/VV/*+았/EP/*` → `가`), or the surface itself.
fn lemma<'a>(surface: &'a str, details: &[&'a str]) -> &'a str {
  match (details.get(4), details.get(7)) {
    (Some(&"Inflect"), Some(expression)) => expression
      .split('+')
      .next()
      .and_then(|morpheme| morpheme.split('/').next())
      .filter(|stem| !stem.is_empty())
      .unwrap_or(surface),
    _ => surface,
  }
}

/// Build a token from a ko-dic surface and its feature columns.
fn token_from(surface: &str, details: &[&str]) -> Token {
  let part = details
    .first()
    .map(|tag| TokenPart::from_ko_dic_tag(tag))
    .unwrap_or(TokenPart::Unknown);
  let text = if part.is_predicate() {
    format!("{}다", lemma(surface, details))
  } else {
    surface.to_string()
  };
  Token { text, part }
}

impl Tokenizer for KoreanTokenizer {
  fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
    let segments = self
      .inner
      .segment(Cow::Borrowed(text))
      .map_err(|e| Error::Tokenizer(format!("failed to segment text: {e}")))?;

    let mut tokens = Vec::with_capacity(segments.len());
    for mut segment in segments {
      let surface = segment.surface.to_string();
      if surface.trim().is_empty() {
        continue;
      }
      let details = segment.details();
      tokens.push(token_from(&surface, &details));
    }
    Ok(tokens)
  }
}
