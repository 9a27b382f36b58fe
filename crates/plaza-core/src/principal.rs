//! The requesting principal: a role plus an optional business-unit
//! assignment, resolved from the caller's session by an outer layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{Error, Result};

/// Staff roles known to the routing rules.
///
/// Any role string that is not one of the named variants is kept verbatim in
/// [`Role::Unrecognized`] so it can be logged and audited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum Role {
  SuperAdmin,
  Owner,
  Waiter,
  Kitchen,
  BarManager,
  CafeManager,
  #[strum(default)]
  Unrecognized(String),
}

impl Role {
  pub fn as_str(&self) -> &str {
    match self {
      Self::SuperAdmin => "super_admin",
      Self::Owner => "owner",
      Self::Waiter => "waiter",
      Self::Kitchen => "kitchen",
      Self::BarManager => "bar_manager",
      Self::CafeManager => "cafe_manager",
      Self::Unrecognized(other) => other,
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for Role {
  fn from(s: String) -> Self {
    match s.parse() {
      Ok(role) => role,
      Err(_) => Self::Unrecognized(s),
    }
  }
}

impl From<Role> for String {
  fn from(role: Role) -> Self {
    match role {
      Role::Unrecognized(other) => other,
      known => known.as_str().to_owned(),
    }
  }
}

/// Who is asking. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub role:          Role,
  pub business_unit: Option<String>,
}

impl Principal {
  /// Build a principal from the raw role string carried by a session.
  pub fn new(role: &str, business_unit: Option<String>) -> Result<Self> {
    if role.trim().is_empty() {
      return Err(Error::EmptyRole);
    }
    Ok(Self { role: Role::from(role.to_owned()), business_unit })
  }

  pub fn with_role(role: Role) -> Self {
    Self { role, business_unit: None }
  }
}
