//! The service time record — the only entity kept in the ledger.
//!
//! Records are stored as JSON objects with camelCase keys. Numeric fields
//! (`seaTime`, `time`) are integers in memory and decimal strings on the wire.

use serde::{Deserialize, Serialize};

use crate::rank::Rank;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a record holder is in their career.
///
/// `Graduate` is the initial state and `Retired` is terminal, although adding
/// service time moves any record back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
  #[serde(alias = "GRAD")]
  Graduate,
  Active,
  Retired,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// One vessel assignment contributing time toward total sea service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTimeEntry {
  pub vessel_owner:  String,
  pub vessel_no:     String,
  pub date_sign_in:  String,
  pub date_sign_off: String,
  #[serde(with = "amount")]
  pub time:          u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTimeRecord {
  pub name:          String,
  /// Opaque; stored verbatim.
  pub date_of_birth: String,
  pub cdn:           String,
  /// Derived from `name` and `cdn` at creation; never recomputed.
  pub record_id:     String,
  /// Running total of all entry times.
  #[serde(with = "amount")]
  pub sea_time:      u64,
  pub status:        Status,
  pub rank:          Rank,
  pub date_reg:      String,
  /// Most recent first.
  pub service_times: Vec<ServiceTimeEntry>,
}

impl ServiceTimeRecord {
  pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(self)
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
    serde_json::from_slice(bytes)
  }
}

// ─── Amounts ─────────────────────────────────────────────────────────────────

/// Parse a well-formed, non-negative decimal amount.
///
/// Accepts a non-empty run of ASCII digits (leading zeros allowed) that fits
/// in a `u64`. Signs, whitespace and fractions are rejected.
pub fn parse_amount(s: &str) -> Option<u64> {
  if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse().ok()
}

mod amount {
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    super::parse_amount(&raw)
      .ok_or_else(|| D::Error::custom(format!("malformed amount {raw:?}")))
  }
}
