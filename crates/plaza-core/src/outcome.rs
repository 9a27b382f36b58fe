//! Tagged results returned across the resolver's public boundary.
//!
//! Store failures never surface as `Err`: they are logged and folded into an
//! [`Outcome::Failure`] carrying a generic message. Serialised, an outcome is
//! `{"success": true, ...payload}` or `{"success": false, "error": "..."}`.

use serde::{Serialize, Serializer};

use crate::notification::Notification;

pub const FETCH_FAILED: &str = "Failed to fetch notifications";
pub const UPDATE_FAILED: &str = "Failed to update notification";
pub const CREATE_FAILED: &str = "Failed to create notification";

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T = Acknowledged> {
  Success(T),
  Failure { error: String },
}

/// Empty success payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledged;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
  pub data: Vec<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnreadCount {
  pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkedAll {
  pub marked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Published {
  pub data: Notification,
}

pub type ListOutcome = Outcome<Listing>;
pub type CountOutcome = Outcome<UnreadCount>;
pub type MarkAllOutcome = Outcome<MarkedAll>;
pub type PublishOutcome = Outcome<Published>;

impl<T> Outcome<T> {
  pub fn failure(error: &str) -> Self {
    Self::Failure { error: error.to_owned() }
  }

  pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

  pub fn success(&self) -> Option<&T> {
    match self {
      Self::Success(payload) => Some(payload),
      Self::Failure { .. } => None,
    }
  }

  pub fn into_success(self) -> Option<T> {
    match self {
      Self::Success(payload) => Some(payload),
      Self::Failure { .. } => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      Self::Success(_) => None,
      Self::Failure { error } => Some(error),
    }
  }
}

#[derive(Serialize)]
struct Repr<'a, T> {
  success: bool,
  #[serde(flatten)]
  payload: Option<&'a T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error:   Option<&'a str>,
}

impl<T: Serialize> Serialize for Outcome<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    Repr {
      success: self.is_success(),
      payload: self.success(),
      error:   self.error(),
    }
    .serialize(serializer)
  }
}
