//! Handlers for `/records` and `/ledger` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/records` | Body: `{"name","dateOfBirth","cdn"}`; returns 201 + record |
//! | `GET`  | `/records/:id` | Stored JSON, byte for byte; 404 if not found |
//! | `POST` | `/records/:id/service-times` | Body: [`NewServiceTime`] |
//! | `POST` | `/records/:id/promote` | Body: `{"rank":"Chief Mate"}` |
//! | `POST` | `/records/:id/retire` | No body |
//! | `POST` | `/ledger/init` | Writes the two sample records |
//!
//! A body that is not valid JSON or lacks a field is a 400 with the same
//! `{"error": ...}` shape as every other failure.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use seatime_core::{
  ledger::LedgerStore,
  record::ServiceTimeRecord,
  service::{NewRecord, NewServiceTime, RecordLifecycleService},
};
use serde::Deserialize;

use crate::error::ApiError;

type Service<L> = Arc<RecordLifecycleService<L>>;

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /records`
pub async fn create<L: LedgerStore>(
  State(service): State<Service<L>>,
  body: Result<Json<NewRecord>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let record = service.create(body).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// `GET /records/:id`
pub async fn query<L: LedgerStore>(
  State(service): State<Service<L>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let raw = service.query(&id).await?;
  Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}

// ─── Service time ────────────────────────────────────────────────────────────

/// `POST /records/:id/service-times`
pub async fn add_service_time<L: LedgerStore>(
  State(service): State<Service<L>>,
  Path(id): Path<String>,
  body: Result<Json<NewServiceTime>, JsonRejection>,
) -> Result<Json<ServiceTimeRecord>, ApiError> {
  let Json(body) = body?;
  Ok(Json(service.add_service_time(&id, body).await?))
}

// ─── Promote / retire ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PromoteBody {
  pub rank: String,
}

/// `POST /records/:id/promote`
pub async fn promote<L: LedgerStore>(
  State(service): State<Service<L>>,
  Path(id): Path<String>,
  body: Result<Json<PromoteBody>, JsonRejection>,
) -> Result<Json<ServiceTimeRecord>, ApiError> {
  let Json(body) = body?;
  Ok(Json(service.promote(&id, &body.rank).await?))
}

/// `POST /records/:id/retire`
pub async fn retire<L: LedgerStore>(
  State(service): State<Service<L>>,
  Path(id): Path<String>,
) -> Result<Json<ServiceTimeRecord>, ApiError> {
  Ok(Json(service.retire(&id).await?))
}

// ─── Seed ────────────────────────────────────────────────────────────────────

/// `POST /ledger/init`
pub async fn init_ledger<L: LedgerStore>(
  State(service): State<Service<L>>,
) -> Result<Json<Vec<ServiceTimeRecord>>, ApiError> {
  Ok(Json(service.init_ledger().await?))
}
