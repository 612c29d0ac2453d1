//! Upstream dictionary access.

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
  Error, Result,
  xml::{self, SearchItem, SenseInfo},
};

/// Connection settings for the upstream dictionary API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
  /// Base URL; `search` and `view` are appended to it.
  pub url:   String,
  /// API key sent as the `key` query parameter.
  pub token: String,
}

impl Default for UpstreamConfig {
  fn default() -> Self {
    Self {
      url:   "https://opendict.korean.go.kr/api/".to_string(),
      token: String::new(),
    }
  }
}

/// Where the scraper reads dictionary entries from.
pub trait DictionarySource: Send + Sync {
  /// Headwords matching `word`, in upstream dictionary order.
  fn search<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Result<Vec<SearchItem>>> + Send + 'a;

  /// Examples and relations of the sense identified by `target_code`.
  fn view(
    &self,
    target_code: i64,
  ) -> impl Future<Output = Result<Option<SenseInfo>>> + Send + '_;
}

/// [`DictionarySource`] backed by the upstream HTTP API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpSource {
  client: Client,
  config: UpstreamConfig,
}

impl HttpSource {
  pub fn new(config: UpstreamConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, endpoint: &str) -> String {
    format!("{}/{}", self.config.url.trim_end_matches('/'), endpoint)
  }

  async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
    let resp = self
      .client
      .get(self.url(endpoint))
      .query(&[("key", self.config.token.as_str())])
      .query(params)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::UpstreamStatus(status.as_u16()));
    }
    Ok(resp.text().await?)
  }
}

impl DictionarySource for HttpSource {
  async fn search(&self, word: &str) -> Result<Vec<SearchItem>> {
    debug!(word, "upstream search");
    let body = self
      .fetch("search", &[
        ("q", word.to_string()),
        ("target_type", "search".to_string()),
        ("part", "word".to_string()),
        ("sort", "dict".to_string()),
      ])
      .await?;
    xml::parse_search(&body)
  }

  async fn view(&self, target_code: i64) -> Result<Option<SenseInfo>> {
    debug!(target_code, "upstream view");
    let body = self
      .fetch("view", &[
        ("q", target_code.to_string()),
        ("target_type", "view".to_string()),
        ("method", "target_code".to_string()),
      ])
      .await?;
    xml::parse_view(&body)
  }
}
