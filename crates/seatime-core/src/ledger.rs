//! The `LedgerStore` trait and an in-memory implementation.
//!
//! The trait is implemented by storage backends (e.g. `seatime-store-sqlite`).
//! Keys and values are opaque to the ledger; record encoding and key
//! derivation belong to this crate.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::atomic::{AtomicUsize, Ordering},
};

use tokio::sync::RwLock;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the external key-value ledger.
///
/// Each call is atomic for its key; there are no partial writes and no
/// cross-key transactions. Conflict detection between concurrent writers is
/// the backend's business.
pub trait LedgerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the bytes stored at `key`, or `None` if nothing is stored there.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send + 'a;

  /// Store `value` at `key`, replacing whatever was there.
  fn put<'a>(
    &'a self,
    key: &'a str,
    value: Vec<u8>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory ledger ────────────────────────────────────────────────────────

/// A process-local ledger backed by a `HashMap`.
///
/// Keeps a count of successful writes so callers can check that a failed
/// operation left the ledger untouched.
#[derive(Debug, Default)]
pub struct MemoryLedger {
  entries: RwLock<HashMap<String, Vec<u8>>>,
  writes:  AtomicUsize,
}

impl MemoryLedger {
  pub fn new() -> Self { Self::default() }

  /// Number of `put` calls that have completed.
  pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

  pub async fn len(&self) -> usize { self.entries.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.entries.read().await.is_empty() }
}

impl LedgerStore for MemoryLedger {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Infallible> {
    Ok(self.entries.read().await.get(key).cloned())
  }

  async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), Infallible> {
    self.entries.write().await.insert(key.to_owned(), value);
    self.writes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}
