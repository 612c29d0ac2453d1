//! word-way server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and either serves the search API or scrapes keywords from
//! the upstream dictionary into the store.
//!
//! ```text
//! word-way serve
//! word-way scrape 떼다 사과
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wordway_scraper::{HttpSource, Ingester};
use wordway_server::ServerConfig;
use wordway_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "word-way dictionary search server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (default).
  Serve,
  /// Fetch keywords from the upstream dictionary into the store.
  Scrape {
    /// Keywords to look up.
    #[arg(required = true)]
    words: Vec<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg =
    ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store, &server_cfg).await,
    Command::Scrape { words } => scrape(store, &server_cfg, &words).await,
  }
}

async fn serve(store: Arc<SqliteStore>, cfg: &ServerConfig) -> anyhow::Result<()> {
  let app = wordway_server::app(store);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn scrape(
  store: Arc<SqliteStore>,
  cfg: &ServerConfig,
  words: &[String],
) -> anyhow::Result<()> {
  let source = HttpSource::new(cfg.upstream.clone())
    .context("failed to build upstream client")?;
  let ingester =
    Ingester::new(store, source).context("failed to load the tokenizer dictionary")?;

  let mut failed = 0usize;
  for word in words {
    match ingester.save_word(word).await {
      Ok(Some(id)) => tracing::info!(%word, %id, "scraped"),
      Ok(None) => tracing::warn!(%word, "no exact match upstream"),
      Err(e) => {
        tracing::error!(%word, error = %e, "scrape failed");
        failed += 1;
      }
    }
  }

  if failed > 0 {
    anyhow::bail!("{failed} of {} keywords failed", words.len());
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
