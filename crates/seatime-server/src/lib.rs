//! HTTP server wiring for the sea service time ledger.
//!
//! Mounts the JSON API from `seatime-api` under `/api` and wraps it in
//! request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use seatime_core::{
  ledger::LedgerStore,
  service::{CreateMode, RecordLifecycleService},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SEATIME_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// Refuse to overwrite an existing record on create.
  #[serde(default)]
  pub strict_create: bool,
  /// Write the sample records at startup.
  #[serde(default)]
  pub seed_on_start: bool,
}

impl ServerConfig {
  pub fn create_mode(&self) -> CreateMode {
    if self.strict_create {
      CreateMode::Strict
    } else {
      CreateMode::Overwrite
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level axum [`Router`].
pub fn router<L>(service: Arc<RecordLifecycleService<L>>) -> Router
where
  L: LedgerStore + 'static,
{
  Router::new()
    .nest("/api", seatime_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use seatime_core::{ledger::MemoryLedger, rank::RankCatalog};
  use tower::ServiceExt as _;

  fn server_config(strict: bool) -> ServerConfig {
    ServerConfig {
      host:          "127.0.0.1".into(),
      port:          5232,
      store_path:    "seatime.db".into(),
      strict_create: strict,
      seed_on_start: false,
    }
  }

  #[test]
  fn create_mode_follows_flag() {
    assert_eq!(server_config(false).create_mode(), CreateMode::Overwrite);
    assert_eq!(server_config(true).create_mode(), CreateMode::Strict);
  }

  #[test]
  fn address_joins_host_and_port() {
    assert_eq!(server_config(false).address(), "127.0.0.1:5232");
  }

  #[test]
  fn expand_tilde_leaves_plain_paths() {
    assert_eq!(expand_tilde(Path::new("/var/lib/x.db")), PathBuf::from("/var/lib/x.db"));
  }

  #[test]
  fn defaults_for_optional_flags() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("host", "0.0.0.0")
      .unwrap()
      .set_override("port", 8080)
      .unwrap()
      .set_override("store_path", "/tmp/ledger.db")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert!(!cfg.strict_create);
    assert!(!cfg.seed_on_start);
    assert_eq!(cfg.port, 8080);
  }

  #[tokio::test]
  async fn api_is_nested_under_prefix() {
    let service = Arc::new(RecordLifecycleService::new(
      Arc::new(MemoryLedger::new()),
      Arc::new(RankCatalog::standard()),
    ));
    service.init_ledger().await.unwrap();

    let resp = router(service.clone())
      .oneshot(
        Request::get("/api/records/MajidShockoohiCDN123456789")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "GRADUATE");

    let resp = router(service)
      .oneshot(Request::get("/records/MajidShockoohiCDN123456789").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
