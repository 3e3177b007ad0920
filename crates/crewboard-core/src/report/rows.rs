//! Flat record projections of the report tree.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::tree::{ReportEmployee, ReportTree, SiteReport};
use crate::status::Status;

/// "Assigned Site" value of an unassigned row.
pub const NOT_ASSIGNED: &str = "Not Assigned";
/// "Site Status" value of an unassigned row, and the manager placeholder.
pub const NOT_APPLICABLE: &str = "N/A";

// ─── EmployeeLabel ───────────────────────────────────────────────────────────

/// Where an employee stands in the report: assigned or not, active or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum EmployeeLabel {
  /// Unassigned and active.
  Available,
  /// Unassigned and inactive.
  Inactive,
  /// Assigned and active.
  Assigned,
  /// Assigned and inactive.
  #[serde(rename = "Assigned (Inactive)")]
  #[strum(serialize = "Assigned (Inactive)")]
  AssignedInactive,
}

impl EmployeeLabel {
  pub fn classify(assigned: bool, status: Status) -> Self {
    match (assigned, status) {
      (false, Status::Active) => Self::Available,
      (false, Status::Inactive) => Self::Inactive,
      (true, Status::Active) => Self::Assigned,
      (true, Status::Inactive) => Self::AssignedInactive,
    }
  }

  /// The glyph shown in front of the label in display rows.
  pub fn glyph(self) -> &'static str {
    match self {
      Self::Available => "🟢",
      Self::Inactive => "⏸️",
      Self::Assigned | Self::AssignedInactive => "✅",
    }
  }
}

fn site_glyph(status: Status) -> &'static str {
  match status {
    Status::Active => "🏗️",
    Status::Inactive => "⏸️",
  }
}

fn or_not_assigned<S: Serializer>(v: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(v.as_deref().unwrap_or(NOT_ASSIGNED))
}

fn or_not_applicable<S: Serializer>(v: &Option<Status>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(v.map(Status::as_str).unwrap_or(NOT_APPLICABLE))
}

// ─── ExportRow ───────────────────────────────────────────────────────────────

/// One employee-site relationship, or one unassigned employee, for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
  #[serde(rename = "Employee Name")]
  pub employee_name:   String,
  #[serde(rename = "Employee ID")]
  pub employee_id:     String,
  /// `None` for unassigned rows.
  #[serde(rename = "Assigned Site", serialize_with = "or_not_assigned")]
  pub site:            Option<String>,
  #[serde(rename = "Site Status", serialize_with = "or_not_applicable")]
  pub site_status:     Option<Status>,
  #[serde(rename = "Employee Status")]
  pub employee_status: EmployeeLabel,
  #[serde(rename = "Report Date")]
  pub report_date:     NaiveDate,
}

impl ExportRow {
  fn unassigned(e: &ReportEmployee, date: NaiveDate) -> Self {
    Self {
      employee_name:   e.name.clone(),
      employee_id:     e.employee_id.clone(),
      site:            None,
      site_status:     None,
      employee_status: EmployeeLabel::classify(false, e.status),
      report_date:     date,
    }
  }

  fn assigned(e: &ReportEmployee, site: &SiteReport, date: NaiveDate) -> Self {
    Self {
      employee_name:   e.name.clone(),
      employee_id:     e.employee_id.clone(),
      site:            Some(site.name.clone()),
      site_status:     Some(site.status),
      employee_status: EmployeeLabel::classify(true, e.status),
      report_date:     date,
    }
  }

  /// Display form of "Assigned Site".
  pub fn site_text(&self) -> String {
    match (&self.site, self.site_status) {
      (Some(name), Some(status)) => format!("{} {name}", site_glyph(status)),
      (Some(name), None) => name.clone(),
      (None, _) => NOT_ASSIGNED.to_owned(),
    }
  }
}

/// Unassigned rows first, then each site's employees in site order.
pub fn export_rows(tree: &ReportTree, date: NaiveDate) -> Vec<ExportRow> {
  let unassigned = tree.unassigned.iter().map(|e| ExportRow::unassigned(e, date));
  let assigned = tree
    .sites
    .iter()
    .flat_map(|site| site.employees.iter().map(move |e| ExportRow::assigned(e, site, date)));
  unassigned.chain(assigned).collect()
}

// ─── DisplayRow ──────────────────────────────────────────────────────────────

/// A row for human-facing tables: the glyph-labelled status leads and the
/// site carries its status glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
  #[serde(rename = "Status")]
  pub status:        String,
  #[serde(rename = "Employee Name")]
  pub employee_name: String,
  #[serde(rename = "Employee ID")]
  pub employee_id:   String,
  #[serde(rename = "Assigned Site")]
  pub site:          String,
  #[serde(rename = "Site Status")]
  pub site_status:   String,
  #[serde(rename = "Date")]
  pub date:          NaiveDate,
}

impl From<&ExportRow> for DisplayRow {
  fn from(row: &ExportRow) -> Self {
    let label = row.employee_status;
    Self {
      status:        format!("{} {label}", label.glyph()),
      employee_name: row.employee_name.clone(),
      employee_id:   row.employee_id.clone(),
      site:          row.site_text(),
      site_status:   row
        .site_status
        .map(Status::as_str)
        .unwrap_or(NOT_APPLICABLE)
        .to_owned(),
      date:          row.report_date,
    }
  }
}

pub fn display_rows(tree: &ReportTree, date: NaiveDate) -> Vec<DisplayRow> {
  export_rows(tree, date).iter().map(DisplayRow::from).collect()
}
