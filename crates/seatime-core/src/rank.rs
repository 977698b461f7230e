//! Professional ranks and the catalog promotions are validated against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A professional grade a record holder can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
  #[serde(rename = "Master Mariner")]
  MasterMariner,
  #[serde(rename = "Chief Mate")]
  ChiefMate,
  #[serde(rename = "Watchkeeping Mate")]
  WatchkeepingMate,
  Cadet,
}

impl Rank {
  /// The label stored in the ledger and accepted on promotion.
  pub fn label(self) -> &'static str {
    match self {
      Rank::MasterMariner => "Master Mariner",
      Rank::ChiefMate => "Chief Mate",
      Rank::WatchkeepingMate => "Watchkeeping Mate",
      Rank::Cadet => "Cadet",
    }
  }
}

impl fmt::Display for Rank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The fixed set of valid ranks, in catalog order.
///
/// Catalog order is not seniority order. Build it once at startup and share
/// it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankCatalog {
  ranks: Vec<Rank>,
}

impl RankCatalog {
  pub fn standard() -> Self {
    Self {
      ranks: vec![
        Rank::MasterMariner,
        Rank::ChiefMate,
        Rank::WatchkeepingMate,
        Rank::Cadet,
      ],
    }
  }

  pub fn ranks(&self) -> &[Rank] { &self.ranks }

  /// Look up a rank by its exact label. Matching is case-sensitive.
  pub fn resolve(&self, candidate: &str) -> Option<Rank> {
    self.ranks.iter().copied().find(|r| r.label() == candidate)
  }

  pub fn is_valid_rank(&self, candidate: &str) -> bool {
    self.resolve(candidate).is_some()
  }
}

impl Default for RankCatalog {
  fn default() -> Self { Self::standard() }
}
