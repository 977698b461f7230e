//! Lifecycle tests for `RecordLifecycleService` against a `MemoryLedger`.

use std::{io, sync::Arc};

use crate::{
  Error,
  ledger::{LedgerStore, MemoryLedger},
  rank::{Rank, RankCatalog},
  record::{ServiceTimeRecord, Status},
  service::{CreateMode, NewRecord, NewServiceTime, RecordLifecycleService},
};

fn service() -> (Arc<MemoryLedger>, RecordLifecycleService<MemoryLedger>) {
  let ledger = Arc::new(MemoryLedger::new());
  let svc = RecordLifecycleService::new(ledger.clone(), Arc::new(RankCatalog::standard()));
  (ledger, svc)
}

fn jane() -> NewRecord {
  NewRecord {
    name:          "Jane Doe".into(),
    date_of_birth: "1990/01/01".into(),
    cdn:           "CDN1".into(),
  }
}

fn voyage(time: &str) -> NewServiceTime {
  NewServiceTime {
    vessel_owner:  "OwnerA".into(),
    vessel_no:     "V1".into(),
    date_sign_in:  "2020/01/01".into(),
    date_sign_off: "2020/06/01".into(),
    time:          time.into(),
  }
}

/// A ledger whose every call fails.
struct DownLedger;

impl LedgerStore for DownLedger {
  type Error = io::Error;

  async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, io::Error> {
    Err(io::Error::other("ledger down"))
  }

  async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<(), io::Error> {
    Err(io::Error::other("ledger down"))
  }
}

/// Reads succeed from `inner`; writes fail.
struct ReadOnlyLedger {
  inner: MemoryLedger,
}

impl LedgerStore for ReadOnlyLedger {
  type Error = io::Error;

  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, io::Error> {
    Ok(self.inner.get(key).await.unwrap_or_else(|never| match never {}))
  }

  async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<(), io::Error> {
    Err(io::Error::other("read only"))
  }
}

fn is_store_error(err: &Error, message: &str) -> bool {
  matches!(err, Error::Store(source) if source.to_string() == message)
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_yields_graduate_cadet() {
  let (ledger, svc) = service();
  assert!(ledger.is_empty().await);
  assert!(Arc::ptr_eq(svc.repository().ledger(), &ledger));

  let record = svc.create(jane()).await.unwrap();
  assert_eq!(record.record_id, "JaneDoeCDN1");
  assert_eq!(record.sea_time, 0);
  assert_eq!(record.status, Status::Graduate);
  assert_eq!(record.rank, Rank::Cadet);
  assert!(record.service_times.is_empty());
  assert!(!record.date_reg.is_empty());

  let stored = ledger.get("JaneDoeCDN1").await.unwrap().unwrap();
  assert_eq!(ServiceTimeRecord::from_bytes(&stored).unwrap(), record);
}

#[tokio::test]
async fn create_accepts_empty_strings() {
  let (_, svc) = service();
  let record = svc
    .create(NewRecord {
      name:          String::new(),
      date_of_birth: String::new(),
      cdn:           String::new(),
    })
    .await
    .unwrap();
  assert_eq!(record.record_id, "");
}

#[tokio::test]
async fn create_overwrites_existing_record_by_default() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();
  svc.add_service_time("JaneDoeCDN1", voyage("100")).await.unwrap();

  let again = svc.create(jane()).await.unwrap();
  assert_eq!(again.sea_time, 0);

  let reloaded = svc.repository().load("JaneDoeCDN1").await.unwrap();
  assert_eq!(reloaded.sea_time, 0);
  assert!(reloaded.service_times.is_empty());
}

#[tokio::test]
async fn strict_create_refuses_existing_key() {
  let (ledger, svc) = service();
  let svc = svc.with_create_mode(CreateMode::Strict);

  svc.create(jane()).await.unwrap();
  let writes = ledger.writes();

  let err = svc.create(jane()).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyExists(ref k) if k == "JaneDoeCDN1"));
  assert_eq!(ledger.writes(), writes);
}

// ─── Service time ────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_service_time_aggregates_newest_first() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();

  let times = ["100", "50", "7", "0"];
  for (i, t) in times.iter().enumerate() {
    let mut input = voyage(t);
    input.vessel_no = format!("V{i}");
    svc.add_service_time("JaneDoeCDN1", input).await.unwrap();
  }

  let record = svc.repository().load("JaneDoeCDN1").await.unwrap();
  assert_eq!(record.sea_time, 157);
  assert_eq!(record.service_times.len(), 4);
  let vessels: Vec<_> = record.service_times.iter().map(|e| e.vessel_no.as_str()).collect();
  assert_eq!(vessels, ["V3", "V2", "V1", "V0"]);
  assert_eq!(record.status, Status::Active);
}

#[tokio::test]
async fn add_service_time_rejects_malformed_time_without_writing() {
  let (ledger, svc) = service();
  svc.create(jane()).await.unwrap();
  let writes = ledger.writes();

  for bad in ["", "abc", "-10", "1.5", "NaN"] {
    let err = svc.add_service_time("JaneDoeCDN1", voyage(bad)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidNumber(_)), "{bad:?}: {err}");
  }
  assert_eq!(ledger.writes(), writes);

  let record = svc.repository().load("JaneDoeCDN1").await.unwrap();
  assert_eq!(record.sea_time, 0);
  assert_eq!(record.status, Status::Graduate);
}

#[tokio::test]
async fn add_service_time_rejects_overflow() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();
  svc
    .add_service_time("JaneDoeCDN1", voyage(&u64::MAX.to_string()))
    .await
    .unwrap();

  let err = svc.add_service_time("JaneDoeCDN1", voyage("1")).await.unwrap_err();
  assert!(matches!(err, Error::InvalidNumber(_)));
}

// Open question: adding time to a retired record re-activates it. This
// matches the ledger contract's observed behaviour and is kept until product
// intent says otherwise.
#[tokio::test]
async fn add_service_time_reactivates_retired_record() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();
  svc.retire("JaneDoeCDN1").await.unwrap();

  let record = svc.add_service_time("JaneDoeCDN1", voyage("10")).await.unwrap();
  assert_eq!(record.status, Status::Active);
}

// ─── Promote / retire ────────────────────────────────────────────────────────

#[tokio::test]
async fn promote_allows_any_catalog_rank() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();

  let up = svc.promote("JaneDoeCDN1", "Master Mariner").await.unwrap();
  assert_eq!(up.rank, Rank::MasterMariner);

  let down = svc.promote("JaneDoeCDN1", "Watchkeeping Mate").await.unwrap();
  assert_eq!(down.rank, Rank::WatchkeepingMate);
  assert_eq!(down.status, Status::Graduate);
}

#[tokio::test]
async fn promote_uses_the_shared_catalog() {
  let ledger = Arc::new(MemoryLedger::new());
  let ranks = Arc::new(RankCatalog::standard());
  let svc = RecordLifecycleService::new(ledger, ranks.clone());
  assert_eq!(svc.rank_catalog(), ranks.as_ref());

  svc.create(jane()).await.unwrap();
  for rank in svc.rank_catalog().ranks() {
    let record = svc.promote("JaneDoeCDN1", rank.label()).await.unwrap();
    assert_eq!(record.rank, *rank);
  }
}

#[tokio::test]
async fn promote_rejects_unknown_rank_without_writing() {
  let (ledger, svc) = service();
  svc.create(jane()).await.unwrap();
  let writes = ledger.writes();

  let err = svc.promote("JaneDoeCDN1", "Captain").await.unwrap_err();
  assert!(matches!(err, Error::InvalidRank(ref r) if r == "Captain"));
  assert_eq!(ledger.writes(), writes);
}

#[tokio::test]
async fn promote_checks_rank_before_loading() {
  let (_, svc) = service();
  let err = svc.promote("Nobody", "Admiral").await.unwrap_err();
  assert!(matches!(err, Error::InvalidRank(_)));
}

#[tokio::test]
async fn retire_is_idempotent() {
  let (_, svc) = service();
  svc.create(jane()).await.unwrap();

  let first = svc.retire("JaneDoeCDN1").await.unwrap();
  let second = svc.retire("JaneDoeCDN1").await.unwrap();
  assert_eq!(first.status, Status::Retired);
  assert_eq!(first, second);
}

// ─── Missing records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn operations_on_missing_record_fail_without_writing() {
  let (ledger, svc) = service();

  assert!(matches!(svc.query("Ghost").await, Err(Error::NotFound(_))));
  assert!(matches!(svc.retire("Ghost").await, Err(Error::NotFound(_))));
  assert!(matches!(
    svc.promote("Ghost", "Chief Mate").await,
    Err(Error::NotFound(_))
  ));
  assert!(matches!(
    svc.add_service_time("Ghost", voyage("5")).await,
    Err(Error::NotFound(_))
  ));
  assert_eq!(ledger.writes(), 0);
}

#[tokio::test]
async fn zero_length_value_is_not_found() {
  let (ledger, svc) = service();
  ledger.put("Empty", Vec::new()).await.unwrap();
  assert!(matches!(svc.query("Empty").await, Err(Error::NotFound(_))));
  assert!(matches!(svc.retire("Empty").await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn undecodable_value_is_corrupt() {
  let (ledger, svc) = service();
  ledger.put("Broken", b"{\"name\":".to_vec()).await.unwrap();
  let writes = ledger.writes();

  let err = svc.retire("Broken").await.unwrap_err();
  assert!(matches!(err, Error::CorruptRecord { ref key, .. } if key == "Broken"));
  assert_eq!(ledger.writes(), writes);
}

// ─── Ledger failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_failures_surface_as_store_errors() {
  let svc = RecordLifecycleService::new(Arc::new(DownLedger), Arc::new(RankCatalog::standard()));

  let err = svc.create(jane()).await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");

  let err = svc.retire("JaneDoeCDN1").await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");

  let err = svc.add_service_time("JaneDoeCDN1", voyage("10")).await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");

  let err = svc.query("JaneDoeCDN1").await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");

  let err = svc.init_ledger().await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");
}

#[tokio::test]
async fn strict_create_fails_on_read_error() {
  let svc = RecordLifecycleService::new(Arc::new(DownLedger), Arc::new(RankCatalog::standard()))
    .with_create_mode(CreateMode::Strict);
  let err = svc.create(jane()).await.unwrap_err();
  assert!(is_store_error(&err, "ledger down"), "{err}");
}

#[tokio::test]
async fn write_failure_after_successful_load_is_a_store_error() {
  let inner = MemoryLedger::new();
  let (_, seed) = service();
  let record = seed.create(jane()).await.unwrap();
  inner.put("JaneDoeCDN1", record.to_bytes().unwrap()).await.unwrap();

  let ledger = Arc::new(ReadOnlyLedger { inner });
  let svc = RecordLifecycleService::new(ledger.clone(), Arc::new(RankCatalog::standard()));

  let err = svc.add_service_time("JaneDoeCDN1", voyage("10")).await.unwrap_err();
  assert!(is_store_error(&err, "read only"), "{err}");
  let err = svc.promote("JaneDoeCDN1", "Chief Mate").await.unwrap_err();
  assert!(is_store_error(&err, "read only"), "{err}");
  let err = svc.retire("JaneDoeCDN1").await.unwrap_err();
  assert!(is_store_error(&err, "read only"), "{err}");

  let stored = svc.repository().load("JaneDoeCDN1").await.unwrap();
  assert_eq!(stored, record);
  assert_eq!(ledger.inner.writes(), 1);
}

// ─── Query / seed ────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_returns_stored_bytes_unchanged() {
  let (ledger, svc) = service();
  let raw = r#"{"legacy":true}"#;
  ledger.put("Legacy", raw.as_bytes().to_vec()).await.unwrap();

  assert_eq!(svc.query("Legacy").await.unwrap(), raw);
}

#[tokio::test]
async fn init_ledger_writes_two_samples() {
  let (ledger, svc) = service();

  let seeded = svc.init_ledger().await.unwrap();
  assert_eq!(seeded.len(), 2);
  assert_eq!(ledger.len().await, 2);

  let majid = svc.repository().load("MajidShockoohiCDN123456789").await.unwrap();
  assert_eq!(majid.status, Status::Graduate);
  assert_eq!(majid.rank, Rank::Cadet);
  assert_eq!(majid.sea_time, 0);

  let jack = svc.repository().load("JackSparrowCDN987654321").await.unwrap();
  assert_eq!(jack.status, Status::Retired);
  assert_eq!(jack.rank, Rank::MasterMariner);
  assert_eq!(jack.sea_time, 200);

  svc.init_ledger().await.unwrap();
  assert_eq!(ledger.len().await, 2);
}

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_career() {
  let (_, svc) = service();

  let record = svc.create(jane()).await.unwrap();
  assert_eq!(record.record_id, "JaneDoeCDN1");
  assert_eq!(record.sea_time, 0);
  assert_eq!(record.rank, Rank::Cadet);

  let record = svc.add_service_time("JaneDoeCDN1", voyage("100")).await.unwrap();
  assert_eq!(record.sea_time, 100);
  assert_eq!(record.status, Status::Active);
  assert_eq!(record.service_times.len(), 1);

  let mut second = voyage("50");
  second.vessel_no = "V2".into();
  let record = svc.add_service_time("JaneDoeCDN1", second).await.unwrap();
  assert_eq!(record.sea_time, 150);
  assert_eq!(record.service_times.len(), 2);
  assert_eq!(record.service_times[0].vessel_no, "V2");
  assert_eq!(record.service_times[0].time, 50);

  let record = svc.promote("JaneDoeCDN1", "Chief Mate").await.unwrap();
  assert_eq!(record.rank, Rank::ChiefMate);
  assert_eq!(record.sea_time, 150);

  let record = svc.retire("JaneDoeCDN1").await.unwrap();
  assert_eq!(record.status, Status::Retired);

  let raw = svc.query("JaneDoeCDN1").await.unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(value["seaTime"], "150");
  assert_eq!(value["rank"], "Chief Mate");
  assert_eq!(value["status"], "RETIRED");
}
