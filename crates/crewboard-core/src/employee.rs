//! Employees.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Result, non_blank,
  error::{Entity, Error},
  status::Status,
};

/// Store-assigned employee identifier. Distinct from the business key
/// [`Employee::employee_id`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub id:            EmployeeId,
  pub name:          String,
  pub surname:       String,
  /// Business key (e.g. a social-security number); unique among employees.
  pub employee_id:   String,
  pub creation_date: NaiveDate,
  pub status:        Status,
}

impl Employee {
  /// `"<name> <surname>"`, the form used in reports and search.
  pub fn full_name(&self) -> String { format!("{} {}", self.name, self.surname) }
}

// ─── NewEmployee ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::WorkforceStore::create_employee`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmployee {
  pub name:          Option<String>,
  pub surname:       Option<String>,
  pub employee_id:   Option<String>,
  /// Defaults to today when absent.
  pub creation_date: Option<NaiveDate>,
  pub status:        Option<Status>,
}

impl NewEmployee {
  /// An employee input with every required field set.
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    employee_id: impl Into<String>,
    status: Status,
  ) -> Self {
    Self {
      name:          Some(name.into()),
      surname:       Some(surname.into()),
      employee_id:   Some(employee_id.into()),
      creation_date: None,
      status:        Some(status),
    }
  }

  pub fn creation_date(mut self, date: NaiveDate) -> Self {
    self.creation_date = Some(date);
    self
  }

  /// Check required fields and normalise text.
  pub fn validate(self) -> Result<EmployeeDraft> {
    let name = non_blank(self.name);
    let surname = non_blank(self.surname);
    let employee_id = non_blank(self.employee_id);

    let mut missing = Vec::new();
    if name.is_none() {
      missing.push("name");
    }
    if surname.is_none() {
      missing.push("surname");
    }
    if employee_id.is_none() {
      missing.push("employee_id");
    }
    if self.status.is_none() {
      missing.push("status");
    }

    match (name, surname, employee_id, self.status) {
      (Some(name), Some(surname), Some(employee_id), Some(status)) => {
        Ok(EmployeeDraft {
          name,
          surname,
          employee_id,
          creation_date: self.creation_date,
          status,
        })
      }
      _ => Err(Error::Validation { entity: Entity::Employee, missing }),
    }
  }
}

/// A validated [`NewEmployee`], ready to be written by a store.
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
  pub name:          String,
  pub surname:       String,
  pub employee_id:   String,
  pub creation_date: Option<NaiveDate>,
  pub status:        Status,
}

// ─── EmployeePatch ───────────────────────────────────────────────────────────

/// Partial update for an employee. The store re-checks `employee_id`
/// uniqueness against every other employee before applying it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
  pub name:          Option<String>,
  pub surname:       Option<String>,
  pub employee_id:   Option<String>,
  pub creation_date: Option<NaiveDate>,
  pub status:        Option<Status>,
}

impl EmployeePatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.surname.is_none()
      && self.employee_id.is_none()
      && self.creation_date.is_none()
      && self.status.is_none()
  }

  /// Reject a patch that would blank out a required text field.
  pub fn validate(&self) -> Result<()> {
    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());

    let mut missing = Vec::new();
    if blank(&self.name) {
      missing.push("name");
    }
    if blank(&self.surname) {
      missing.push("surname");
    }
    if blank(&self.employee_id) {
      missing.push("employee_id");
    }

    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation { entity: Entity::Employee, missing })
    }
  }
}
