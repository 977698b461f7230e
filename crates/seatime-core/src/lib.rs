//! Core types and lifecycle logic for sea service time records.
//!
//! This crate is deliberately free of HTTP and database dependencies. All
//! persistence goes through the [`ledger::LedgerStore`] trait; backends live
//! in their own crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod key;
pub mod ledger;
pub mod rank;
pub mod record;
pub mod repository;
pub mod service;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
