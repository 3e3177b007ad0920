//! The report aggregator.
//!
//! Joins sites, employees, and assignments into read-only views. Nothing is
//! cached: every [`Report`] is built from a fresh [`Snapshot`] of the store,
//! and building it has no side effects.
//!
//! An employee counts as assigned when they are assigned to *any* site,
//! active or inactive.

mod rows;
mod summary;
mod tree;

use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDateTime, Timelike};

pub use rows::{
  DisplayRow, EmployeeLabel, ExportRow, NOT_APPLICABLE, NOT_ASSIGNED, display_rows,
  export_rows,
};
pub use summary::{ReportDocument, ReportInfo, ReportSummary, SiteSummaryRow};
pub use tree::{ReportEmployee, ReportTree, SiteReport, UNASSIGNED_KEY};

use crate::{
  assignment::Assignment,
  employee::{Employee, EmployeeId},
  site::{Site, SiteId},
  store::WorkforceStore,
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Every row of the three tables, read in one pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub sites:       Vec<Site>,
  pub employees:   Vec<Employee>,
  pub assignments: Vec<Assignment>,
}

impl Snapshot {
  /// Read all sites, employees, and assignments from `store` in one pass.
  pub async fn load<S: WorkforceStore>(store: &S) -> Result<Self, S::Error> {
    store.snapshot().await
  }

  /// Ids of every employee assigned to at least one known site, whatever
  /// that site's status.
  pub fn assigned_ids(&self) -> HashSet<EmployeeId> {
    let sites: HashSet<SiteId> = self.sites.iter().map(|s| s.id).collect();
    self
      .assignments
      .iter()
      .filter(|a| sites.contains(&a.site_id))
      .map(|a| a.employee_id)
      .collect()
  }

  /// The employees assigned to `site_id`, in assignment order.
  pub fn employees_at(&self, site_id: SiteId) -> Vec<&Employee> {
    let by_id: HashMap<EmployeeId, &Employee> =
      self.employees.iter().map(|e| (e.id, e)).collect();
    self
      .assignments
      .iter()
      .filter(|a| a.site_id == site_id)
      .filter_map(|a| by_id.get(&a.employee_id).copied())
      .collect()
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// A report over one snapshot, with the time it was generated.
///
/// The structured tree is built once; the flat projections are derived from
/// it on demand.
#[derive(Debug, Clone)]
pub struct Report {
  snapshot:     Snapshot,
  tree:         ReportTree,
  generated_at: NaiveDateTime,
}

impl Report {
  /// Build a report from `snapshot`. `generated_at` is truncated to whole
  /// seconds.
  pub fn new(snapshot: Snapshot, generated_at: NaiveDateTime) -> Self {
    let tree = ReportTree::build(&snapshot);
    let generated_at = generated_at.with_nanosecond(0).unwrap_or(generated_at);
    Self { snapshot, tree, generated_at }
  }

  /// Read the current state of `store` and build a report stamped with the
  /// local time.
  pub async fn generate<S: WorkforceStore>(store: &S) -> Result<Self, S::Error> {
    let snapshot = Snapshot::load(store).await?;
    Ok(Self::new(snapshot, Local::now().naive_local()))
  }

  pub fn generated_at(&self) -> NaiveDateTime { self.generated_at }

  /// The structured tree: unassigned employees plus one entry per site.
  pub fn tree(&self) -> &ReportTree { &self.tree }

  /// Flat rows for export encoders.
  pub fn export_rows(&self) -> Vec<ExportRow> {
    export_rows(&self.tree, self.generated_at.date())
  }

  /// Flat rows for human-facing tables.
  pub fn display_rows(&self) -> Vec<DisplayRow> {
    display_rows(&self.tree, self.generated_at.date())
  }

  pub fn summary(&self) -> ReportSummary {
    ReportSummary::compute(&self.snapshot, &self.tree, self.generated_at)
  }

  pub fn sites_summary(&self) -> Vec<SiteSummaryRow> {
    SiteSummaryRow::collect(&self.snapshot, &self.tree)
  }

  /// The JSON export document: report metadata plus the structured tree.
  pub fn document(&self) -> ReportDocument {
    ReportDocument {
      report_info: ReportInfo::compute(&self.snapshot, self.generated_at),
      assignments: self.tree.clone(),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::{fixtures::*, *};
  use crate::status::Status;

  #[test]
  fn generated_at_is_truncated_to_seconds() {
    let at = at().with_nanosecond(123_456_789).unwrap();
    let report = Report::new(Snapshot::default(), at);
    assert_eq!(report.generated_at().nanosecond(), 0);
  }

  #[test]
  fn employees_at_follows_assignment_order() {
    let snapshot = Snapshot {
      sites:       vec![site(1, "A", Status::Active)],
      employees:   vec![
        employee(10, "X", "SS-X", Status::Active),
        employee(11, "Y", "SS-Y", Status::Active),
      ],
      assignments: vec![assignment(1, 11), assignment(1, 10)],
    };
    let ids: Vec<_> = snapshot
      .employees_at(SiteId(1))
      .into_iter()
      .map(|e| e.id.0)
      .collect();
    assert_eq!(ids, [11, 10]);
  }

  #[test]
  fn assignments_to_unknown_sites_are_ignored() {
    let snapshot = two_by_two(vec![assignment(99, 10)]);
    assert!(snapshot.assigned_ids().is_empty());
  }
}
