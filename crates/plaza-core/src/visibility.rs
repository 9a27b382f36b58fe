//! Role → visibility scope table.
//!
//! Every principal sees only unread notifications. On top of that base
//! filter, a role contributes at most one extra clause, restricting either
//! the audience tag or the business unit. The table in [`scope_for`] is the
//! single place those rules live.

use crate::{
  filter::{Field, Filter},
  principal::{Principal, Role},
};

pub const WAITER_RECIPIENTS: &[&str] = &["waiter", "all"];
pub const KITCHEN_RECIPIENTS: &[&str] = &["kitchen", "all"];
pub const BAR_UNIT: &str = "bar";
pub const CAFE_UNITS: &[&str] = &["restaurant", "cafe", "takeaway"];

/// What a role is allowed to see beyond the unread base filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
  /// Every unread notification, across all recipients and units.
  Unrestricted,
  /// Only notifications addressed to one of these audience tags.
  Recipients(&'static [&'static str]),
  /// Only notifications concerning exactly this business unit.
  BusinessUnit(&'static str),
  /// Only notifications concerning one of these business units.
  BusinessUnits(&'static [&'static str]),
  /// A role with no entry in the table. Adds no clause, so it sees the same
  /// set as [`Scope::Unrestricted`]; kept distinct so callers can flag it.
  UnrecognizedRole,
}

/// The routing table.
pub fn scope_for(role: &Role) -> Scope {
  match role {
    Role::SuperAdmin | Role::Owner => Scope::Unrestricted,
    Role::Waiter => Scope::Recipients(WAITER_RECIPIENTS),
    Role::Kitchen => Scope::Recipients(KITCHEN_RECIPIENTS),
    Role::BarManager => Scope::BusinessUnit(BAR_UNIT),
    Role::CafeManager => Scope::BusinessUnits(CAFE_UNITS),
    Role::Unrecognized(_) => Scope::UnrecognizedRole,
  }
}

impl Scope {
  /// The role-specific clause, if any.
  pub fn clause(self) -> Option<Filter> {
    match self {
      Self::Unrestricted | Self::UnrecognizedRole => None,
      Self::Recipients(tags) => {
        Some(Filter::is_in(Field::Recipient, tags.iter().copied()))
      }
      Self::BusinessUnit(unit) => Some(Filter::equals(Field::BusinessUnit, unit)),
      Self::BusinessUnits(units) => {
        Some(Filter::is_in(Field::BusinessUnit, units.iter().copied()))
      }
    }
  }
}

/// The base filter applied to every principal.
pub fn unread() -> Filter { Filter::equals(Field::IsRead, false) }

/// Full filter list for `principal`: the unread base filter first, then the
/// role clause when the role has one.
pub fn visibility_filters(principal: &Principal) -> Vec<Filter> {
  let mut filters = vec![unread()];
  filters.extend(scope_for(&principal.role).clause());
  filters
}
