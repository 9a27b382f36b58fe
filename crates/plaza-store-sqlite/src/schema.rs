//! SQL schema for the Plaza SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are written by producers and only ever updated to flip is_read 0 -> 1.
CREATE TABLE IF NOT EXISTS notifications (
    id            TEXT PRIMARY KEY,
    kind          TEXT NOT NULL,
    title         TEXT NOT NULL,
    message       TEXT NOT NULL DEFAULT '',
    recipient     TEXT NOT NULL,   -- audience tag: 'waiter' | 'kitchen' | 'all' | ...
    business_unit TEXT NOT NULL,   -- 'bar' | 'cafe' | 'restaurant' | ...
    priority      TEXT NOT NULL DEFAULT 'medium',
    metadata      TEXT NOT NULL DEFAULT 'null',   -- JSON
    is_read       INTEGER NOT NULL DEFAULT 0 CHECK (is_read IN (0, 1)),
    created_at    TEXT NOT NULL,   -- fixed-width RFC 3339 UTC; sorts chronologically
    expires_at    TEXT
);

CREATE INDEX IF NOT EXISTS notifications_unread_idx
    ON notifications(is_read, created_at);

PRAGMA user_version = 1;
";
