//! Error types for `wordway-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown word part: {0:?}")]
  UnknownWordPart(String),

  #[error("unknown match priority: {0}")]
  UnknownPriority(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
