//! Async HTTP client wrapping the seatime JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, Url};
use seatime_core::record::ServiceTimeRecord;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

/// Connection settings for the seatime API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the seatime JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  /// Build `<base_url>/api/<segments...>`, percent-encoding each segment.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&self.config.base_url)
      .with_context(|| format!("invalid server url {:?}", self.config.base_url))?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("server url {:?} cannot take a path", self.config.base_url))?
      .pop_if_empty()
      .push("api")
      .extend(segments);
    Ok(url)
  }

  async fn post<T: DeserializeOwned>(&self, segments: &[&str], body: Option<Value>) -> Result<T> {
    let url = self.url(segments)?;
    let path = url.path().to_owned();
    let mut req = self.client.post(url);
    if let Some(body) = body {
      req = req.json(&body);
    }
    let resp = req
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    let resp = check(resp, "POST", &path).await?;
    resp.json().await.context("deserialising response")
  }

  // ── Operations ────────────────────────────────────────────────────────────

  /// `POST /api/records`
  pub async fn create(&self, name: &str, date_of_birth: &str, cdn: &str) -> Result<ServiceTimeRecord> {
    self
      .post(
        &["records"],
        Some(json!({ "name": name, "dateOfBirth": date_of_birth, "cdn": cdn })),
      )
      .await
  }

  /// `POST /api/records/:id/service-times`
  pub async fn add_service_time(&self, record_id: &str, entry: Value) -> Result<ServiceTimeRecord> {
    self
      .post(&["records", record_id, "service-times"], Some(entry))
      .await
  }

  /// `POST /api/records/:id/promote`
  pub async fn promote(&self, record_id: &str, rank: &str) -> Result<ServiceTimeRecord> {
    self
      .post(
        &["records", record_id, "promote"],
        Some(json!({ "rank": rank })),
      )
      .await
  }

  /// `POST /api/records/:id/retire`
  pub async fn retire(&self, record_id: &str) -> Result<ServiceTimeRecord> {
    self.post(&["records", record_id, "retire"], None).await
  }

  /// `POST /api/ledger/init`
  pub async fn init_ledger(&self) -> Result<Vec<ServiceTimeRecord>> {
    self.post(&["ledger", "init"], None).await
  }

  /// `GET /api/records/:id` — the stored JSON as the ledger holds it.
  pub async fn query(&self, record_id: &str) -> Result<Value> {
    let url = self.url(&["records", record_id])?;
    let path = url.path().to_owned();
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    let resp = check(resp, "GET", &path).await?;
    resp.json().await.context("deserialising record")
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, method: &str, path: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
    .unwrap_or_default();
  Err(anyhow!("{method} {path} → {status}: {message}"))
}
