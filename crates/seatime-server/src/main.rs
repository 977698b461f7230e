//! seatime server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite ledger, and serves the JSON API over HTTP.
//!
//! ```toml
//! host          = "127.0.0.1"
//! port          = 5232
//! store_path    = "~/.local/share/seatime/ledger.db"
//! strict_create = false
//! seed_on_start = false
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use seatime_core::{rank::RankCatalog, service::RecordLifecycleService};
use seatime_server::{ServerConfig, expand_tilde};
use seatime_store_sqlite::SqliteLedger;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sea service time ledger server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Write the sample records at startup, regardless of configuration.
  #[arg(long)]
  seed: bool,
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

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5232)?
    .set_default("store_path", "seatime.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SEATIME"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let ledger = SqliteLedger::open(&store_path)
    .await
    .with_context(|| format!("failed to open ledger at {store_path:?}"))?;

  // The rank catalog is fixed for the life of the process.
  let ranks = Arc::new(RankCatalog::standard());
  let service = Arc::new(
    RecordLifecycleService::new(Arc::new(ledger), ranks)
      .with_create_mode(server_cfg.create_mode()),
  );

  if cli.seed || server_cfg.seed_on_start {
    service
      .init_ledger()
      .await
      .context("failed to seed ledger")?;
  }

  let app = seatime_server::router(service);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
