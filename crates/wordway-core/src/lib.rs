//! Core types and trait definitions for the word-way dictionary.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the search pipeline: keywords are resolved into three tagged candidate
//! groups ([`resolve`]) which are then merged into the public response shape
//! ([`merge`]). [`search::SearchService`] ties the two together over any
//! [`store::DictionaryStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod merge;
pub mod pronunciation;
pub mod query;
pub mod relation;
pub mod resolve;
pub mod search;
pub mod store;
pub mod word;

pub use error::{Error, Result};
