//! Populates a word-way store from the upstream dictionary API.
//!
//! [`source::HttpSource`] talks to the upstream service and decodes its XML
//! ([`xml`]); [`ingest::Ingester`] writes what it finds through any
//! [`wordway_core::store::DictionaryStore`]. Definitions are split into
//! tokens by a shared [`tokenize::Tokenizer`] to discover inclusion edges.

pub mod error;
pub mod ingest;
pub mod source;
pub mod tokenize;
pub mod xml;

pub use error::{Error, Result};
pub use ingest::Ingester;
pub use source::{DictionarySource, HttpSource, UpstreamConfig};
