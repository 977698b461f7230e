//! SQL schema for the SQLite ledger.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per ledger key. Values are opaque bytes owned by the caller.
-- Rows are upserted, never deleted.
CREATE TABLE IF NOT EXISTS ledger (
    key         TEXT PRIMARY KEY,
    value       BLOB NOT NULL,
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

PRAGMA user_version = 1;
";
