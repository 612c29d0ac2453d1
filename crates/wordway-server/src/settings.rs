//! Layered runtime configuration.
//!
//! Values come from an optional TOML file overridden by `WORDWAY_*`
//! environment variables; nested keys use `__`, e.g.
//! `WORDWAY_UPSTREAM__TOKEN`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wordway_scraper::UpstreamConfig;

/// Runtime configuration for both `serve` and `scrape`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path: PathBuf,
  pub upstream:   UpstreamConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       5000,
      store_path: PathBuf::from("word-way.db"),
      upstream:   UpstreamConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (missing is fine) and then the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("WORDWAY")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(cfg.store_path, PathBuf::from("word-way.db"));
    assert_eq!(cfg.upstream.url, "https://opendict.korean.go.kr/api/");
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir()
      .join(format!("word-way-settings-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "port = 8080\n[upstream]\nurl = \"http://localhost/api/\"\ntoken = \"abc\"\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.upstream.url, "http://localhost/api/");
    assert_eq!(cfg.upstream.token, "abc");
  }
}
