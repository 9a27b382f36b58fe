//! Notification types: the records routed by the visibility resolver.
//!
//! Notifications are produced by other parts of the system (billing,
//! bookings, the internal order flow) and addressed by two open-ended tags:
//! an audience (`recipient`) and an operational unit (`business_unit`).
//! The only field this service ever mutates is `is_read`, and only from
//! `false` to `true`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::Result;

/// Name of the collection every notification lives in.
pub const NOTIFICATIONS: &str = "notifications";

// ─── Priority ────────────────────────────────────────────────────────────────

/// How urgently a notification should be surfaced.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
  Critical,
}

// ─── Notification ────────────────────────────────────────────────────────────

/// A persisted notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
  pub id:            Uuid,
  /// Producer-defined type tag, e.g. `"payment_received"`.
  pub kind:          String,
  pub title:         String,
  pub message:       String,
  /// Audience tag: `"waiter"`, `"kitchen"`, `"all"`, a department name, ...
  pub recipient:     String,
  /// Operational unit the notification concerns: `"bar"`, `"cafe"`, ...
  pub business_unit: String,
  #[serde(default)]
  pub priority:      Priority,
  /// Free-form payload (order ids, amounts, receipt numbers).
  #[serde(default)]
  pub metadata:      serde_json::Value,
  pub is_read:       bool,
  /// Store-assigned; listings are ordered newest-first on this field.
  pub created_at:    DateTime<Utc>,
  /// Carried for producers and clients; never consulted for visibility.
  pub expires_at:    Option<DateTime<Utc>>,
}

// ─── NewNotification ─────────────────────────────────────────────────────────

/// Input to [`crate::store::NotificationStore::create_document`].
/// `id`, `is_read` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
  pub kind:          String,
  pub title:         String,
  #[serde(default)]
  pub message:       String,
  pub recipient:     String,
  pub business_unit: String,
  #[serde(default)]
  pub priority:      Priority,
  #[serde(default)]
  pub metadata:      serde_json::Value,
  #[serde(default)]
  pub expires_at:    Option<DateTime<Utc>>,
}

impl NewNotification {
  /// Convenience constructor with the optional fields set to their defaults
  /// and the message left empty.
  pub fn new(
    kind: impl Into<String>,
    recipient: impl Into<String>,
    business_unit: impl Into<String>,
    title: impl Into<String>,
  ) -> Self {
    Self {
      kind:          kind.into(),
      title:         title.into(),
      message:       String::new(),
      recipient:     recipient.into(),
      business_unit: business_unit.into(),
      priority:      Priority::default(),
      metadata:      serde_json::Value::Null,
      expires_at:    None,
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = message.into();
    self
  }

  pub fn with_priority(mut self, priority: Priority) -> Self {
    self.priority = priority;
    self
  }

  /// Attach a serialisable metadata payload.
  pub fn with_metadata<T: Serialize>(mut self, metadata: &T) -> Result<Self> {
    self.metadata = serde_json::to_value(metadata)?;
    Ok(self)
  }

  pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
    self.expires_at = Some(at);
    self
  }

  /// Materialise the stored record. Used by store backends.
  pub fn into_notification(
    self,
    id: Uuid,
    created_at: DateTime<Utc>,
  ) -> Notification {
    Notification {
      id,
      kind: self.kind,
      title: self.title,
      message: self.message,
      recipient: self.recipient,
      business_unit: self.business_unit,
      priority: self.priority,
      metadata: self.metadata,
      is_read: false,
      created_at,
      expires_at: self.expires_at,
    }
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// The only mutation this service issues against a stored notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPatch {
  pub is_read: bool,
}

impl NotificationPatch {
  pub fn mark_read() -> Self { Self { is_read: true } }
}
