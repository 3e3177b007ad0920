//! Error types for `crewboard-core`.

use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
  Site,
  Employee,
}

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was absent or blank.
  #[error("{entity} is missing required field(s): {}", .missing.join(", "))]
  Validation {
    entity:  Entity,
    missing: Vec<&'static str>,
  },

  /// Another employee already holds this business key.
  #[error("employee id {0:?} is already in use")]
  DuplicateEmployeeId(String),
}

impl Error {
  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation { .. }) }

  pub fn is_conflict(&self) -> bool { matches!(self, Self::DuplicateEmployeeId(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
