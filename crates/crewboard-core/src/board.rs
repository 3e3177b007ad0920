//! The assignment board: available employees and one column per active site.
//!
//! Only active sites get a column, and only active employees are shown. An
//! employee assigned to an inactive site is still not available.

use serde::Serialize;

use crate::{
  employee::Employee,
  report::Snapshot,
  site::Site,
  store::WorkforceStore,
};

/// Active employees not assigned to any site, in insertion order.
pub fn available_employees(snapshot: &Snapshot) -> Vec<Employee> {
  let assigned = snapshot.assigned_ids();
  snapshot
    .employees
    .iter()
    .filter(|e| e.status.is_active() && !assigned.contains(&e.id))
    .cloned()
    .collect()
}

/// An active site and the active employees assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
  pub site:      Site,
  pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentBoard {
  pub available:          Vec<Employee>,
  pub columns:            Vec<BoardColumn>,
  /// Assignments on active sites, whatever the employee's status.
  pub active_assignments: usize,
}

impl AssignmentBoard {
  pub fn build(snapshot: &Snapshot) -> Self {
    let active_sites: Vec<&Site> =
      snapshot.sites.iter().filter(|s| s.status.is_active()).collect();

    let columns = active_sites
      .iter()
      .map(|site| BoardColumn {
        site:      (*site).clone(),
        employees: snapshot
          .employees_at(site.id)
          .into_iter()
          .filter(|e| e.status.is_active())
          .cloned()
          .collect(),
      })
      .collect();

    let active_assignments = snapshot
      .assignments
      .iter()
      .filter(|a| active_sites.iter().any(|s| s.id == a.site_id))
      .count();

    Self { available: available_employees(snapshot), columns, active_assignments }
  }

  pub async fn load<S: WorkforceStore>(store: &S) -> Result<Self, S::Error> {
    Ok(Self::build(&Snapshot::load(store).await?))
  }
}
