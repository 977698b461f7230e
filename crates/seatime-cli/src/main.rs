//! `seatime` — command-line client for the sea service time ledger.
//!
//! # Usage
//!
//! ```text
//! seatime --url http://localhost:5232 create "Jane Doe" 1990/01/01 CDN1
//! seatime add-time JaneDoeCDN1 --owner OwnerA --vessel V1 \
//!   --sign-in 2020/01/01 --sign-off 2020/06/01 --time 100
//! seatime promote JaneDoeCDN1 "Chief Mate"
//! seatime --config ~/.config/seatime/config.toml query JaneDoeCDN1
//! ```

mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "seatime", about = "Client for the sea service time ledger")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the seatime server (default: http://localhost:5232).
  #[arg(long, env = "SEATIME_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Register a new record holder.
  Create {
    name:          String,
    date_of_birth: String,
    cdn:           String,
  },
  /// Add a vessel assignment to a record.
  AddTime {
    record_id: String,
    #[arg(long)]
    owner:     String,
    #[arg(long)]
    vessel:    String,
    #[arg(long)]
    sign_in:   String,
    #[arg(long)]
    sign_off:  String,
    /// Time served on this assignment; a non-negative whole number.
    #[arg(long)]
    time:      String,
  },
  /// Change a record's rank.
  Promote { record_id: String, rank: String },
  /// Mark a record retired.
  Retire { record_id: String },
  /// Print a record as stored in the ledger.
  Query { record_id: String },
  /// Write the sample records.
  Init,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:5232".to_string()),
  };
  tracing::debug!(base_url = %api_config.base_url, "using server");

  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Create { name, date_of_birth, cdn } => {
      print_json(&client.create(&name, &date_of_birth, &cdn).await?)
    }
    Command::AddTime { record_id, owner, vessel, sign_in, sign_off, time } => {
      let entry = json!({
        "vesselOwner": owner,
        "vesselNo":    vessel,
        "dateSignIn":  sign_in,
        "dateSignOff": sign_off,
        "time":        time,
      });
      print_json(&client.add_service_time(&record_id, entry).await?)
    }
    Command::Promote { record_id, rank } => {
      print_json(&client.promote(&record_id, &rank).await?)
    }
    Command::Retire { record_id } => print_json(&client.retire(&record_id).await?),
    Command::Query { record_id } => print_json(&client.query(&record_id).await?),
    Command::Init => print_json(&client.init_ledger().await?),
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let text = serde_json::to_string_pretty(value).context("formatting output")?;
  println!("{text}");
  Ok(())
}
