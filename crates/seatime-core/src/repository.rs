//! [`RecordRepository`] — loads and saves records through a [`LedgerStore`].

use std::sync::Arc;

use crate::{Error, Result, ledger::LedgerStore, record::ServiceTimeRecord};

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

/// Typed access to records held in a ledger.
///
/// Cloning is cheap — the ledger is reference-counted.
pub struct RecordRepository<L> {
  ledger: Arc<L>,
}

impl<L> Clone for RecordRepository<L> {
  fn clone(&self) -> Self { Self { ledger: Arc::clone(&self.ledger) } }
}

impl<L: LedgerStore> RecordRepository<L> {
  pub fn new(ledger: Arc<L>) -> Self { Self { ledger } }

  pub fn ledger(&self) -> &Arc<L> { &self.ledger }

  /// Fetch the stored bytes for `key`.
  ///
  /// An absent key and a zero-length value are both `NotFound`.
  pub async fn load_raw(&self, key: &str) -> Result<Vec<u8>> {
    match self.ledger.get(key).await.map_err(store_error)? {
      Some(bytes) if !bytes.is_empty() => Ok(bytes),
      _ => Err(Error::NotFound(key.to_owned())),
    }
  }

  /// Fetch and decode the record at `key`.
  pub async fn load(&self, key: &str) -> Result<ServiceTimeRecord> {
    let bytes = self.load_raw(key).await?;
    ServiceTimeRecord::from_bytes(&bytes).map_err(|e| Error::CorruptRecord {
      key:    key.to_owned(),
      reason: e.to_string(),
    })
  }

  /// Whether `key` currently holds a non-empty value.
  pub async fn exists(&self, key: &str) -> Result<bool> {
    let bytes = self.ledger.get(key).await.map_err(store_error)?;
    Ok(bytes.is_some_and(|b| !b.is_empty()))
  }

  /// Encode `record` and write it to `key`.
  pub async fn save(&self, key: &str, record: &ServiceTimeRecord) -> Result<()> {
    let bytes = record.to_bytes().map_err(|e| Error::CorruptRecord {
      key:    key.to_owned(),
      reason: e.to_string(),
    })?;
    self.ledger.put(key, bytes).await.map_err(store_error)
  }

  /// Write a brand-new record. Whatever was stored at `key` is overwritten.
  pub async fn create(&self, key: &str, record: &ServiceTimeRecord) -> Result<()> {
    self.save(key, record).await
  }
}
