//! The two-valued lifecycle flag shared by sites and employees.

use serde::{Deserialize, Serialize};

/// Whether a site or employee is currently in use.
///
/// Serialised and stored as `"Active"` / `"Inactive"`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
pub enum Status {
  Active,
  Inactive,
}

impl Status {
  pub fn is_active(self) -> bool { matches!(self, Self::Active) }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Inactive => "Inactive",
    }
  }
}
