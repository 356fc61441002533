//! SQL schema for the fun-facts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per state code; the list is stored as a JSON array so that
-- positional order survives round trips.
CREATE TABLE IF NOT EXISTS fun_facts (
    state_code  TEXT PRIMARY KEY,
    funfacts    TEXT NOT NULL DEFAULT '[]'
);

PRAGMA user_version = 1;
";
