//! Error type for `plaza-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown priority: {0:?}")]
  UnknownPriority(String),

  /// Only the `notifications` collection exists.
  #[error("unknown collection: {0:?}")]
  UnknownCollection(String),

  #[error("notification not found: {0}")]
  NotificationNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
