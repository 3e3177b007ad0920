//! The structured report tree.
//!
//! Serialises to a single JSON object: the unassigned employees under
//! [`UNASSIGNED_KEY`], then one key per site named after the site.

use std::collections::HashSet;

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::Snapshot;
use crate::{
  employee::{Employee, EmployeeId},
  site::SiteId,
  status::Status,
};

/// Key of the unassigned-employee list in the serialised tree.
pub const UNASSIGNED_KEY: &str = "Employees";

/// An employee as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEmployee {
  #[serde(skip)]
  pub id:          EmployeeId,
  /// `"<name> <surname>"`.
  pub name:        String,
  pub employee_id: String,
  pub status:      Status,
}

impl From<&Employee> for ReportEmployee {
  fn from(e: &Employee) -> Self {
    Self {
      id:          e.id,
      name:        e.full_name(),
      employee_id: e.employee_id.clone(),
      status:      e.status,
    }
  }
}

/// One site and the employees assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
  pub site_id:   SiteId,
  pub name:      String,
  pub status:    Status,
  pub employees: Vec<ReportEmployee>,
}

/// Unassigned employees plus every site (active or inactive) with its
/// assigned employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTree {
  /// Employees not assigned to any site, in insertion order.
  pub unassigned: Vec<ReportEmployee>,
  /// Sites in insertion order.
  pub sites:      Vec<SiteReport>,
}

impl ReportTree {
  pub fn build(snapshot: &Snapshot) -> Self {
    let assigned = snapshot.assigned_ids();

    let unassigned = snapshot
      .employees
      .iter()
      .filter(|e| !assigned.contains(&e.id))
      .map(ReportEmployee::from)
      .collect();

    let sites = snapshot
      .sites
      .iter()
      .map(|site| SiteReport {
        site_id:   site.id,
        name:      site.name.clone(),
        status:    site.status,
        employees: snapshot
          .employees_at(site.id)
          .into_iter()
          .map(ReportEmployee::from)
          .collect(),
      })
      .collect();

    Self { unassigned, sites }
  }

  /// First site entry named `name`.
  pub fn site(&self, name: &str) -> Option<&SiteReport> {
    self.sites.iter().find(|s| s.name == name)
  }

  /// The object key of each site entry, parallel to [`Self::sites`].
  ///
  /// A site whose name is already taken (by an earlier site or by
  /// [`UNASSIGNED_KEY`]) is keyed as `"<name> (#<id>)"`, with the suffix
  /// repeated until the key is unique.
  pub fn site_keys(&self) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::from([UNASSIGNED_KEY.to_owned()]);
    self
      .sites
      .iter()
      .map(|site| {
        let mut key = site.name.clone();
        while taken.contains(&key) {
          key = format!("{key} (#{})", site.site_id);
        }
        taken.insert(key.clone());
        key
      })
      .collect()
  }
}

#[derive(Serialize)]
struct SiteEntry<'a> {
  status:    Status,
  employees: &'a [ReportEmployee],
}

impl Serialize for ReportTree {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.sites.len() + 1))?;
    map.serialize_entry(UNASSIGNED_KEY, &self.unassigned)?;
    for (key, site) in self.site_keys().iter().zip(&self.sites) {
      map.serialize_entry(
        key,
        &SiteEntry { status: site.status, employees: &site.employees },
      )?;
    }
    map.end()
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use proptest::prelude::*;
  use serde_json::json;

  use super::*;
  use crate::report::fixtures::*;

  fn names(list: &[ReportEmployee]) -> Vec<&str> {
    list.iter().map(|e| e.name.as_str()).collect()
  }

  #[test]
  fn scenario_single_assignment() {
    let tree = ReportTree::build(&two_by_two(vec![assignment(1, 10)]));

    assert_eq!(names(&tree.unassigned), ["Y Test"]);

    let a = tree.site("Site A").unwrap();
    assert_eq!(a.status, Status::Active);
    assert_eq!(names(&a.employees), ["X Test"]);

    let b = tree.site("Site B").unwrap();
    assert_eq!(b.status, Status::Inactive);
    assert!(b.employees.is_empty());
  }

  #[test]
  fn inactive_site_assignment_still_counts_as_assigned() {
    let tree = ReportTree::build(&two_by_two(vec![assignment(2, 10)]));
    assert_eq!(names(&tree.unassigned), ["Y Test"]);
    assert_eq!(names(&tree.site("Site B").unwrap().employees), ["X Test"]);
  }

  #[test]
  fn serialises_to_keyed_object() {
    let tree = ReportTree::build(&two_by_two(vec![assignment(1, 10)]));
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(
      value,
      json!({
        "Employees": [
          { "name": "Y Test", "employee_id": "SS-Y", "status": "Inactive" }
        ],
        "Site A": {
          "status": "Active",
          "employees": [
            { "name": "X Test", "employee_id": "SS-X", "status": "Active" }
          ]
        },
        "Site B": { "status": "Inactive", "employees": [] }
      })
    );
  }

  #[test]
  fn clashing_site_names_get_distinct_keys() {
    let snapshot = Snapshot {
      sites: vec![
        site(1, "Depot", Status::Active),
        site(2, "Depot", Status::Inactive),
        site(3, UNASSIGNED_KEY, Status::Active),
      ],
      ..Snapshot::default()
    };
    let tree = ReportTree::build(&snapshot);
    assert_eq!(tree.site_keys(), ["Depot", "Depot (#2)", "Employees (#3)"]);

    let value = serde_json::to_value(&tree).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    assert!(obj["Employees"].is_array());
  }

  #[test]
  fn fallback_key_never_reuses_a_literal_site_name() {
    let snapshot = Snapshot {
      sites: vec![
        site(1, "Depot", Status::Active),
        site(2, "Depot (#3)", Status::Active),
        site(3, "Depot", Status::Inactive),
      ],
      ..Snapshot::default()
    };
    let tree = ReportTree::build(&snapshot);
    assert_eq!(tree.site_keys(), ["Depot", "Depot (#3)", "Depot (#3) (#3)"]);

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 4);
    assert_eq!(value["Depot (#3) (#3)"]["status"], "Inactive");
  }

  // ─── Partition property ────────────────────────────────────────────────

  fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    (
      prop::collection::vec(any::<bool>(), 0..5),
      prop::collection::vec(any::<bool>(), 0..8),
      prop::collection::vec((0usize..5, 0usize..8), 0..20),
    )
      .prop_map(|(site_flags, emp_flags, pairs)| {
        let status = |active: bool| {
          if active { Status::Active } else { Status::Inactive }
        };
        let sites: Vec<_> = site_flags
          .iter()
          .enumerate()
          .map(|(i, &a)| site(i as i64 + 1, &format!("S{i}"), status(a)))
          .collect();
        let employees: Vec<_> = emp_flags
          .iter()
          .enumerate()
          .map(|(i, &a)| employee(i as i64 + 100, &format!("E{i}"), &format!("K{i}"), status(a)))
          .collect();

        let mut seen = HashSet::new();
        let assignments = pairs
          .into_iter()
          .filter(|&(s, e)| s < sites.len() && e < employees.len())
          .filter(|pair| seen.insert(*pair))
          .map(|(s, e)| assignment(sites[s].id.0, employees[e].id.0))
          .collect();

        Snapshot { sites, employees, assignments }
      })
  }

  proptest! {
    #[test]
    fn unassigned_and_site_lists_partition_employees(snapshot in arb_snapshot()) {
      let tree = ReportTree::build(&snapshot);

      let unassigned: HashSet<_> = tree.unassigned.iter().map(|e| e.id).collect();
      prop_assert_eq!(unassigned.len(), tree.unassigned.len());

      let mut on_sites = HashSet::new();
      for site in &tree.sites {
        let ids: HashSet<_> = site.employees.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids.len(), site.employees.len());
        on_sites.extend(ids);
      }

      prop_assert!(unassigned.is_disjoint(&on_sites));
      let all: HashSet<_> = snapshot.employees.iter().map(|e| e.id).collect();
      let covered: HashSet<_> = unassigned.union(&on_sites).copied().collect();
      prop_assert_eq!(covered, all);
    }
  }
}
