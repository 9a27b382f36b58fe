//! Document filters handed to a [`NotificationStore`].
//!
//! A filter list is always combined conjunctively. [`Filter::matches`] gives
//! the reference in-memory semantics; backends are free to translate the
//! same filters into their own query language.
//!
//! [`NotificationStore`]: crate::store::NotificationStore

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::notification::Notification;

/// Notification fields that can be filtered or ordered on.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  IsRead,
  Recipient,
  BusinessUnit,
  CreatedAt,
}

impl Field {
  pub fn as_str(self) -> &'static str { self.into() }

  /// Whether `value` has the type this field holds. A value of the wrong
  /// type can never equal the field.
  pub fn accepts(self, value: &Scalar) -> bool {
    matches!(
      (self, value),
      (Self::IsRead, Scalar::Bool(_))
        | (Self::Recipient | Self::BusinessUnit | Self::CreatedAt, Scalar::Text(_))
    )
  }

  /// Extract this field from a notification as a comparable scalar.
  /// Timestamps compare as fixed-width RFC 3339 text (nanoseconds, `Z`), which
  /// sorts chronologically.
  pub fn value_of(self, n: &Notification) -> Scalar {
    match self {
      Self::IsRead => Scalar::Bool(n.is_read),
      Self::Recipient => Scalar::Text(n.recipient.clone()),
      Self::BusinessUnit => Scalar::Text(n.business_unit.clone()),
      Self::CreatedAt => {
        Scalar::Text(n.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
      }
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
  #[serde(rename = "==")]
  Eq,
  #[serde(rename = "in")]
  In,
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Asc,
  #[default]
  Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
  Bool(bool),
  Text(String),
}

impl From<bool> for Scalar {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<&str> for Scalar {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Scalar {
  fn from(s: String) -> Self { Self::Text(s) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
  Scalar(Scalar),
  List(Vec<Scalar>),
}

/// A single `field <operator> value` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
  pub field:    Field,
  pub operator: Operator,
  pub value:    FilterValue,
}

impl Filter {
  /// `field == value`
  pub fn equals(field: Field, value: impl Into<Scalar>) -> Self {
    Self {
      field,
      operator: Operator::Eq,
      value: FilterValue::Scalar(value.into()),
    }
  }

  /// `field in [values...]`
  pub fn is_in<I, V>(field: Field, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Scalar>,
  {
    Self {
      field,
      operator: Operator::In,
      value: FilterValue::List(values.into_iter().map(Into::into).collect()),
    }
  }

  pub fn matches(&self, n: &Notification) -> bool {
    let actual = self.field.value_of(n);
    match (self.operator, &self.value) {
      (Operator::Eq, FilterValue::Scalar(expected)) => actual == *expected,
      (Operator::In, FilterValue::List(candidates)) => {
        candidates.contains(&actual)
      }
      // A shape mismatch never matches anything.
      (Operator::Eq, FilterValue::List(_))
      | (Operator::In, FilterValue::Scalar(_)) => false,
    }
  }
}

/// `true` when `n` satisfies every filter (an empty list matches everything).
pub fn matches_all(filters: &[Filter], n: &Notification) -> bool {
  filters.iter().all(|f| f.matches(n))
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::notification::NewNotification;

  fn notification(recipient: &str, unit: &str) -> Notification {
    NewNotification::new("test", recipient, unit, "t")
      .into_notification(Uuid::new_v4(), Utc::now())
  }

  #[test]
  fn field_types() {
    assert!(Field::IsRead.accepts(&Scalar::Bool(false)));
    assert!(!Field::IsRead.accepts(&"0".into()));
    assert!(Field::Recipient.accepts(&"waiter".into()));
    assert!(!Field::Recipient.accepts(&true.into()));

    let n = notification("1", "bar");
    assert!(!Filter::equals(Field::Recipient, true).matches(&n));
    assert!(!Filter::equals(Field::IsRead, "0").matches(&n));
  }

  #[test]
  fn eq_on_bool() {
    let mut n = notification("waiter", "restaurant");
    let unread = Filter::equals(Field::IsRead, false);
    assert!(unread.matches(&n));
    n.is_read = true;
    assert!(!unread.matches(&n));
  }

  #[test]
  fn in_on_text() {
    let f = Filter::is_in(Field::Recipient, ["waiter", "all"]);
    assert!(f.matches(&notification("all", "bar")));
    assert!(!f.matches(&notification("kitchen", "bar")));
  }

  #[test]
  fn bool_never_equals_text() {
    let f = Filter::equals(Field::IsRead, "false");
    assert!(!f.matches(&notification("waiter", "bar")));
  }

  #[test]
  fn mismatched_shapes_never_match() {
    let f = Filter {
      field:    Field::BusinessUnit,
      operator: Operator::In,
      value:    FilterValue::Scalar("bar".into()),
    };
    assert!(!f.matches(&notification("all", "bar")));
  }

  #[test]
  fn empty_filter_list_matches() {
    assert!(matches_all(&[], &notification("all", "bar")));
  }

  #[test]
  fn wire_format() {
    let f = Filter::is_in(Field::BusinessUnit, ["cafe", "takeaway"]);
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "field": "business_unit",
        "operator": "in",
        "value": ["cafe", "takeaway"],
      })
    );
  }
}
