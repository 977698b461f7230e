//! JSON REST API for sea service time records.
//!
//! Exposes an axum [`Router`] backed by a [`RecordLifecycleService`] over any
//! [`LedgerStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", seatime_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use seatime_core::{ledger::LedgerStore, service::RecordLifecycleService};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<L>(service: Arc<RecordLifecycleService<L>>) -> Router<()>
where
  L: LedgerStore + 'static,
{
  Router::new()
    .route("/records", post(records::create::<L>))
    .route("/records/{id}", get(records::query::<L>))
    .route("/records/{id}/service-times", post(records::add_service_time::<L>))
    .route("/records/{id}/promote", post(records::promote::<L>))
    .route("/records/{id}/retire", post(records::retire::<L>))
    .route("/ledger/init", post(records::init_ledger::<L>))
    .with_state(service)
}
