//! [`RecordLifecycleService`] — the five record operations plus ledger
//! seeding.
//!
//! Every mutating operation is one read-modify-write against a single key:
//! validate, load, change the in-memory record, save. Validation always
//! precedes the write, so a failed call leaves the ledger untouched.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::{
  Error, Result,
  key::derive_key,
  ledger::LedgerStore,
  rank::{Rank, RankCatalog},
  record::{ServiceTimeEntry, ServiceTimeRecord, Status, parse_amount},
  repository::RecordRepository,
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Arguments to [`RecordLifecycleService::create`]. Content is not validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
  pub name:          String,
  pub date_of_birth: String,
  pub cdn:           String,
}

/// Arguments to [`RecordLifecycleService::add_service_time`].
///
/// `time` arrives as a string and is parsed before aggregation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceTime {
  pub vessel_owner:  String,
  pub vessel_no:     String,
  pub date_sign_in:  String,
  pub date_sign_off: String,
  pub time:          String,
}

/// What `create` does when the derived key already holds a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateMode {
  /// Write unconditionally, replacing any existing record.
  #[default]
  Overwrite,
  /// Fail with [`Error::AlreadyExists`].
  Strict,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct RecordLifecycleService<L> {
  repo:  RecordRepository<L>,
  ranks: Arc<RankCatalog>,
  mode:  CreateMode,
}

impl<L: LedgerStore> RecordLifecycleService<L> {
  pub fn new(ledger: Arc<L>, ranks: Arc<RankCatalog>) -> Self {
    Self {
      repo: RecordRepository::new(ledger),
      ranks,
      mode: CreateMode::default(),
    }
  }

  pub fn with_create_mode(mut self, mode: CreateMode) -> Self {
    self.mode = mode;
    self
  }

  pub fn repository(&self) -> &RecordRepository<L> { &self.repo }

  pub fn rank_catalog(&self) -> &RankCatalog { &self.ranks }

  /// Register a new record holder as a graduate cadet with no sea time.
  pub async fn create(&self, input: NewRecord) -> Result<ServiceTimeRecord> {
    let record_id = derive_key(&input.name, &input.cdn);

    if self.mode == CreateMode::Strict && self.repo.exists(&record_id).await? {
      tracing::warn!(%record_id, "refusing to overwrite existing record");
      return Err(Error::AlreadyExists(record_id));
    }

    let record = ServiceTimeRecord {
      record_id,
      name:          input.name,
      date_of_birth: input.date_of_birth,
      cdn:           input.cdn,
      sea_time:      0,
      status:        Status::Graduate,
      rank:          Rank::Cadet,
      date_reg:      Utc::now().to_rfc3339(),
      service_times: Vec::new(),
    };

    self.repo.create(&record.record_id, &record).await?;
    tracing::info!(record_id = %record.record_id, "created record");
    Ok(record)
  }

  /// Append a vessel assignment, add its time to the running total and mark
  /// the record active.
  ///
  /// Retired records are re-activated too.
  pub async fn add_service_time(
    &self,
    record_id: &str,
    input:     NewServiceTime,
  ) -> Result<ServiceTimeRecord> {
    let mut record = self.repo.load(record_id).await?;

    let Some(time) = parse_amount(&input.time) else {
      tracing::warn!(record_id, time = %input.time, "rejected malformed time");
      return Err(Error::InvalidNumber(input.time));
    };
    let sea_time = record
      .sea_time
      .checked_add(time)
      .ok_or_else(|| Error::InvalidNumber(input.time.clone()))?;

    record.sea_time = sea_time;
    record.service_times.insert(0, ServiceTimeEntry {
      vessel_owner:  input.vessel_owner,
      vessel_no:     input.vessel_no,
      date_sign_in:  input.date_sign_in,
      date_sign_off: input.date_sign_off,
      time,
    });
    record.status = Status::Active;

    self.repo.save(record_id, &record).await?;
    tracing::info!(record_id, time, sea_time, "added service time");
    Ok(record)
  }

  /// Replace the record's rank. Any catalog rank may replace any other.
  pub async fn promote(&self, record_id: &str, new_rank: &str) -> Result<ServiceTimeRecord> {
    let Some(rank) = self.ranks.resolve(new_rank) else {
      tracing::warn!(record_id, new_rank, "rejected unknown rank");
      return Err(Error::InvalidRank(new_rank.to_owned()));
    };

    let mut record = self.repo.load(record_id).await?;
    record.rank = rank;

    self.repo.save(record_id, &record).await?;
    tracing::info!(record_id, %rank, "promoted");
    Ok(record)
  }

  /// Mark the record retired. Retiring twice rewrites the same value.
  pub async fn retire(&self, record_id: &str) -> Result<ServiceTimeRecord> {
    let mut record = self.repo.load(record_id).await?;
    record.status = Status::Retired;

    self.repo.save(record_id, &record).await?;
    tracing::info!(record_id, "retired");
    Ok(record)
  }

  /// Return the stored representation of a record exactly as the ledger
  /// holds it.
  pub async fn query(&self, record_id: &str) -> Result<String> {
    let bytes = self.repo.load_raw(record_id).await?;
    tracing::debug!(record_id, len = bytes.len(), "queried record");
    String::from_utf8(bytes).map_err(|e| Error::CorruptRecord {
      key:    record_id.to_owned(),
      reason: e.to_string(),
    })
  }

  /// Write the two fixed sample records, replacing any existing ones.
  pub async fn init_ledger(&self) -> Result<Vec<ServiceTimeRecord>> {
    let date_reg = Utc::now().to_rfc3339();
    let samples = [
      sample_record(
        "Majid Shockoohi",
        "1984/04/28",
        "CDN123456789",
        0,
        Status::Graduate,
        Rank::Cadet,
        &date_reg,
      ),
      sample_record(
        "Jack Sparrow",
        "1800/04/28",
        "CDN987654321",
        200,
        Status::Retired,
        Rank::MasterMariner,
        &date_reg,
      ),
    ];

    for record in &samples {
      self.repo.create(&record.record_id, record).await?;
    }
    tracing::info!(count = samples.len(), "seeded ledger with sample records");
    Ok(samples.into())
  }
}

fn sample_record(
  name:          &str,
  date_of_birth: &str,
  cdn:           &str,
  sea_time:      u64,
  status:        Status,
  rank:          Rank,
  date_reg:      &str,
) -> ServiceTimeRecord {
  ServiceTimeRecord {
    record_id: derive_key(name, cdn),
    name: name.to_owned(),
    date_of_birth: date_of_birth.to_owned(),
    cdn: cdn.to_owned(),
    sea_time,
    status,
    rank,
    date_reg: date_reg.to_owned(),
    service_times: Vec::new(),
  }
}
