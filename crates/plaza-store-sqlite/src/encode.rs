//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order is
//! chronological order. Metadata is stored as compact JSON. UUIDs are stored
//! as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use plaza_core::notification::{Notification, Priority};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Priority ─────────────────────────────────────────────────────────────────

pub fn encode_priority(p: Priority) -> &'static str { p.into() }

pub fn decode_priority(s: &str) -> Result<Priority> {
  s.parse().map_err(|_| Error::UnknownPriority(s.to_owned()))
}

// ─── Bool ─────────────────────────────────────────────────────────────────────

pub fn encode_bool(b: bool) -> i64 { i64::from(b) }

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawNotification`].
pub const COLUMNS: &str = "id, kind, title, message, recipient, business_unit, \
                           priority, metadata, is_read, created_at, expires_at";

/// A `notifications` row exactly as read from SQLite.
pub struct RawNotification {
  pub id:            String,
  pub kind:          String,
  pub title:         String,
  pub message:       String,
  pub recipient:     String,
  pub business_unit: String,
  pub priority:      String,
  pub metadata:      String,
  pub is_read:       bool,
  pub created_at:    String,
  pub expires_at:    Option<String>,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      kind:          row.get(1)?,
      title:         row.get(2)?,
      message:       row.get(3)?,
      recipient:     row.get(4)?,
      business_unit: row.get(5)?,
      priority:      row.get(6)?,
      metadata:      row.get(7)?,
      is_read:       row.get(8)?,
      created_at:    row.get(9)?,
      expires_at:    row.get(10)?,
    })
  }

  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      id:            decode_uuid(&self.id)?,
      kind:          self.kind,
      title:         self.title,
      message:       self.message,
      recipient:     self.recipient,
      business_unit: self.business_unit,
      priority:      decode_priority(&self.priority)?,
      metadata:      serde_json::from_str(&self.metadata)?,
      is_read:       self.is_read,
      created_at:    decode_dt(&self.created_at)?,
      expires_at:    self.expires_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
