//! Aggregate counts over a report.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::{
  Snapshot,
  rows::{EmployeeLabel, NOT_APPLICABLE, export_rows},
  tree::ReportTree,
};
use crate::status::Status;

/// `part / whole` as a percentage rounded to one decimal; 0 when `whole` is 0.
fn rate(part: usize, whole: usize) -> f64 {
  if whole == 0 {
    return 0.0;
  }
  (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

fn count_active<T>(items: &[T], status: impl Fn(&T) -> Status) -> usize {
  items.iter().filter(|i| status(i).is_active()).count()
}

// ─── ReportInfo ──────────────────────────────────────────────────────────────

/// Headline counts, stamped with the generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportInfo {
  pub generated_date:     NaiveDate,
  pub generated_time:     NaiveTime,
  pub total_employees:    usize,
  pub active_employees:   usize,
  pub inactive_employees: usize,
  pub total_sites:        usize,
  pub active_sites:       usize,
  pub inactive_sites:     usize,
}

impl ReportInfo {
  pub fn compute(snapshot: &Snapshot, at: NaiveDateTime) -> Self {
    let active_employees = count_active(&snapshot.employees, |e| e.status);
    let active_sites = count_active(&snapshot.sites, |s| s.status);
    Self {
      generated_date: at.date(),
      generated_time: at.time(),
      total_employees: snapshot.employees.len(),
      active_employees,
      inactive_employees: snapshot.employees.len() - active_employees,
      total_sites: snapshot.sites.len(),
      active_sites,
      inactive_sites: snapshot.sites.len() - active_sites,
    }
  }
}

/// The JSON export: metadata plus the structured tree.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
  pub report_info: ReportInfo,
  pub assignments: ReportTree,
}

// ─── ReportSummary ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
  #[serde(flatten)]
  pub info:                   ReportInfo,
  /// Export rows that name a site.
  pub assigned_count:         usize,
  /// Unassigned, active employees.
  pub available_count:        usize,
  /// Unassigned, inactive employees.
  pub inactive_unassigned:    usize,
  /// Sites with at least one assigned employee.
  pub sites_with_assignments: usize,
  /// `assigned_count` over active employees, in percent.
  pub assignment_rate:        f64,
  /// `sites_with_assignments` over active sites, in percent.
  pub sites_rate:             f64,
  /// `available_count` over active employees, in percent.
  pub available_rate:         f64,
}

impl ReportSummary {
  pub fn compute(snapshot: &Snapshot, tree: &ReportTree, at: NaiveDateTime) -> Self {
    let info = ReportInfo::compute(snapshot, at);
    let rows = export_rows(tree, at.date());

    let assigned_count = rows.iter().filter(|r| r.site.is_some()).count();
    let unassigned_with = |label: EmployeeLabel| {
      rows
        .iter()
        .filter(|r| r.site.is_none() && r.employee_status == label)
        .count()
    };
    let available_count = unassigned_with(EmployeeLabel::Available);
    let inactive_unassigned = unassigned_with(EmployeeLabel::Inactive);
    let sites_with_assignments =
      tree.sites.iter().filter(|s| !s.employees.is_empty()).count();

    Self {
      assignment_rate: rate(assigned_count, info.active_employees),
      sites_rate: rate(sites_with_assignments, info.active_sites),
      available_rate: rate(available_count, info.active_employees),
      info,
      assigned_count,
      available_count,
      inactive_unassigned,
      sites_with_assignments,
    }
  }
}

// ─── SiteSummaryRow ──────────────────────────────────────────────────────────

/// One row of the per-site summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSummaryRow {
  #[serde(rename = "Site Name")]
  pub name:               String,
  #[serde(rename = "Manager")]
  pub manager:            String,
  #[serde(rename = "Assigned Employees")]
  pub assigned_employees: usize,
  #[serde(rename = "Status")]
  pub status:             Status,
}

impl SiteSummaryRow {
  /// One row per site, active or inactive, in insertion order.
  pub fn collect(snapshot: &Snapshot, tree: &ReportTree) -> Vec<Self> {
    snapshot
      .sites
      .iter()
      .zip(&tree.sites)
      .map(|(site, entry)| Self {
        name:               site.name.clone(),
        manager:            if site.manager.is_empty() {
          NOT_APPLICABLE.to_owned()
        } else {
          site.manager.clone()
        },
        assigned_employees: entry.employees.len(),
        status:             site.status,
      })
      .collect()
  }
}
