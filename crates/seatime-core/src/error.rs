//! Error types for `seatime-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} does not exist")]
  NotFound(String),

  #[error("{0} already exists")]
  AlreadyExists(String),

  #[error("{0} is not a valid rank")]
  InvalidRank(String),

  #[error("invalid amount of time: {0:?}")]
  InvalidNumber(String),

  #[error("record {key} is corrupt: {reason}")]
  CorruptRecord { key: String, reason: String },

  #[error("ledger error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
