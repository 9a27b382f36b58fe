//! [`SqliteStore`]: the SQLite implementation of [`NotificationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use plaza_core::{
  filter::{Direction, Field, Filter},
  notification::{NOTIFICATIONS, NewNotification, Notification, NotificationPatch},
  store::NotificationStore,
};

use crate::{
  encode::{
    COLUMNS, RawNotification, encode_bool, encode_dt, encode_priority,
    encode_uuid,
  },
  query::{order_clause, where_clause},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Plaza notification store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Notification`] as-is, including its `is_read`
  /// and `created_at` values. Used for imports and test fixtures.
  pub async fn insert(&self, n: &Notification) -> Result<()> {
    let id_str         = encode_uuid(n.id);
    let kind           = n.kind.clone();
    let title          = n.title.clone();
    let message        = n.message.clone();
    let recipient      = n.recipient.clone();
    let business_unit  = n.business_unit.clone();
    let priority_str   = encode_priority(n.priority);
    let metadata_str   = serde_json::to_string(&n.metadata)?;
    let is_read        = encode_bool(n.is_read);
    let created_at_str = encode_dt(n.created_at);
    let expires_at_str = n.expires_at.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (
             id, kind, title, message, recipient, business_unit,
             priority, metadata, is_read, created_at, expires_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            kind,
            title,
            message,
            recipient,
            business_unit,
            priority_str,
            metadata_str,
            is_read,
            created_at_str,
            expires_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn check_collection(collection: &str) -> Result<()> {
  if collection == NOTIFICATIONS {
    Ok(())
  } else {
    Err(Error::UnknownCollection(collection.to_owned()))
  }
}

// ─── NotificationStore impl ──────────────────────────────────────────────────

impl NotificationStore for SqliteStore {
  type Error = Error;

  async fn query_documents(
    &self,
    collection: &str,
    filters:    &[Filter],
    order_by:   Field,
    direction:  Direction,
  ) -> Result<Vec<Notification>> {
    check_collection(collection)?;

    let clause = where_clause(filters);
    let sql = format!(
      "SELECT {COLUMNS} FROM notifications {} {}",
      clause.sql,
      order_clause(order_by, direction),
    );
    let params = clause.params;

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawNotification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotification::into_notification).collect()
  }

  async fn update_document(
    &self,
    collection: &str,
    id:         Uuid,
    patch:      NotificationPatch,
  ) -> Result<()> {
    check_collection(collection)?;

    let id_str  = encode_uuid(id);
    let is_read = encode_bool(patch.is_read);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET is_read = ?1 WHERE id = ?2",
          rusqlite::params![is_read, id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotificationNotFound(id));
    }
    Ok(())
  }

  async fn create_document(
    &self,
    collection: &str,
    input:      NewNotification,
  ) -> Result<Notification> {
    check_collection(collection)?;

    let notification = input.into_notification(Uuid::new_v4(), Utc::now());
    self.insert(&notification).await?;
    Ok(notification)
  }

  async fn get_document(
    &self,
    collection: &str,
    id:         Uuid,
  ) -> Result<Option<Notification>> {
    check_collection(collection)?;

    let id_str = encode_uuid(id);
    let sql    = format!("SELECT {COLUMNS} FROM notifications WHERE id = ?1");

    let raw: Option<RawNotification> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawNotification::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNotification::into_notification).transpose()
  }
}
