//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, assignment timestamps as
//! `YYYY-MM-DD HH:MM:SS`, and statuses as their display text.

use std::str::FromStr as _;

use chrono::{NaiveDate, NaiveDateTime};
use crewboard_core::{
  assignment::Assignment,
  employee::{Employee, EmployeeId},
  site::{Site, SiteId},
  status::Status,
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_datetime(dt: NaiveDateTime) -> String {
  dt.format(DATETIME_FORMAT).to_string()
}

pub fn decode_datetime(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<Status> {
  Status::from_str(s).map_err(|_| Error::InvalidData(format!("unknown status: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const SITE_COLUMNS: &str = "id, name, manager, phone, creation_date, status";

/// Raw values read directly from a `construction_sites` row.
pub struct RawSite {
  pub id:            i64,
  pub name:          String,
  pub manager:       String,
  pub phone:         Option<String>,
  pub creation_date: String,
  pub status:        String,
}

impl RawSite {
  /// Map a row selected with [`SITE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      manager:       row.get(2)?,
      phone:         row.get(3)?,
      creation_date: row.get(4)?,
      status:        row.get(5)?,
    })
  }

  pub fn into_site(self) -> Result<Site> {
    Ok(Site {
      id:            SiteId(self.id),
      name:          self.name,
      manager:       self.manager,
      phone:         self.phone,
      creation_date: decode_date(&self.creation_date)?,
      status:        decode_status(&self.status)?,
    })
  }
}

pub const EMPLOYEE_COLUMNS: &str =
  "id, name, surname, employee_id, creation_date, status";

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub id:            i64,
  pub name:          String,
  pub surname:       String,
  pub employee_id:   String,
  pub creation_date: String,
  pub status:        String,
}

impl RawEmployee {
  /// Map a row selected with [`EMPLOYEE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      surname:       row.get(2)?,
      employee_id:   row.get(3)?,
      creation_date: row.get(4)?,
      status:        row.get(5)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:            EmployeeId(self.id),
      name:          self.name,
      surname:       self.surname,
      employee_id:   self.employee_id,
      creation_date: decode_date(&self.creation_date)?,
      status:        decode_status(&self.status)?,
    })
  }
}

pub const ASSIGNMENT_COLUMNS: &str = "site_id, employee_id, assignment_date";

/// Raw values read directly from an `assignments` row.
pub struct RawAssignment {
  pub site_id:         i64,
  pub employee_id:     i64,
  pub assignment_date: String,
}

impl RawAssignment {
  /// Map a row selected with [`ASSIGNMENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      site_id:         row.get(0)?,
      employee_id:     row.get(1)?,
      assignment_date: row.get(2)?,
    })
  }

  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      site_id:         SiteId(self.site_id),
      employee_id:     EmployeeId(self.employee_id),
      assignment_date: decode_datetime(&self.assignment_date)?,
    })
  }
}
