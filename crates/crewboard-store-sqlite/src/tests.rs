//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use crewboard_core::{
  board::AssignmentBoard,
  employee::{EmployeeId, EmployeePatch, NewEmployee},
  report::{EmployeeLabel, Report},
  site::{NewSite, SiteId, SitePatch},
  status::Status,
  store::{StoreError, WorkforceStore},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn employee(name: &str, key: &str, status: Status) -> NewEmployee {
  NewEmployee::new(name, "Test", key, status)
}

// ─── Sites ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_site() {
  let s = store().await;
  let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

  let id = s
    .create_site(
      NewSite::new("12 Buildings in Minnesota", Status::Active)
        .manager("Juan Pérez")
        .phone("555-0101")
        .creation_date(date),
    )
    .await
    .unwrap();

  let site = s.get_site(id).await.unwrap().unwrap();
  assert_eq!(site.id, id);
  assert_eq!(site.name, "12 Buildings in Minnesota");
  assert_eq!(site.manager, "Juan Pérez");
  assert_eq!(site.phone.as_deref(), Some("555-0101"));
  assert_eq!(site.creation_date, date);
  assert_eq!(site.status, Status::Active);
}

#[tokio::test]
async fn get_site_missing_returns_none() {
  let s = store().await;
  assert!(s.get_site(SiteId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn create_site_without_status_fails_validation() {
  let s = store().await;
  let input = NewSite { name: Some("Depot".into()), ..NewSite::default() };
  let err = s.create_site(input).await.unwrap_err();
  assert!(err.domain().is_some_and(|e| e.is_validation()));
  assert!(s.list_sites(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let a = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  assert!(s.delete_site(a).await.unwrap());
  let b = s.create_site(NewSite::new("B", Status::Active)).await.unwrap();
  assert!(b > a);
}

#[tokio::test]
async fn list_sites_filters_by_status_in_insertion_order() {
  let s = store().await;
  let a = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  s.create_site(NewSite::new("B", Status::Inactive)).await.unwrap();
  let c = s.create_site(NewSite::new("C", Status::Active)).await.unwrap();

  let all = s.list_sites(None).await.unwrap();
  assert_eq!(all.len(), 3);

  let active: Vec<_> = s
    .list_sites(Some(Status::Active))
    .await
    .unwrap()
    .into_iter()
    .map(|site| site.id)
    .collect();
  assert_eq!(active, [a, c]);
}

#[tokio::test]
async fn update_site_applies_only_given_fields() {
  let s = store().await;
  let id = s
    .create_site(NewSite::new("Depot", Status::Active).phone("555-0000"))
    .await
    .unwrap();

  let patch = SitePatch {
    status: Some(Status::Inactive),
    phone: Some(String::new()),
    ..SitePatch::default()
  };
  assert!(s.update_site(id, patch).await.unwrap());

  let site = s.get_site(id).await.unwrap().unwrap();
  assert_eq!(site.name, "Depot");
  assert_eq!(site.status, Status::Inactive);
  assert_eq!(site.phone, None);
}

#[tokio::test]
async fn update_site_missing_or_empty() {
  let s = store().await;
  let patch = SitePatch { name: Some("X".into()), ..SitePatch::default() };
  assert!(!s.update_site(SiteId(9), patch).await.unwrap());
  assert!(s.update_site(SiteId(9), SitePatch::default()).await.unwrap());
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_business_key_is_rejected_without_mutation() {
  let s = store().await;
  s.create_employee(employee("Luis", "SS-12345", Status::Active))
    .await
    .unwrap();

  let err = s
    .create_employee(employee("Otro", "SS-12345", Status::Active))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(crewboard_core::Error::DuplicateEmployeeId(ref k)) if k == "SS-12345"
  ));
  assert!(err.domain().is_some_and(|e| e.is_conflict()));
  assert_eq!(s.list_employees(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_employee_checks_key_against_others_only() {
  let s = store().await;
  let a = s
    .create_employee(employee("A", "SS-1", Status::Active))
    .await
    .unwrap();
  let b = s
    .create_employee(employee("B", "SS-2", Status::Active))
    .await
    .unwrap();

  let keep_own = EmployeePatch {
    employee_id: Some("SS-1".into()),
    status: Some(Status::Inactive),
    ..EmployeePatch::default()
  };
  assert!(s.update_employee(a, keep_own).await.unwrap());

  let steal = EmployeePatch {
    employee_id: Some("SS-1".into()),
    ..EmployeePatch::default()
  };
  let err = s.update_employee(b, steal).await.unwrap_err();
  assert!(err.domain().is_some_and(|e| e.is_conflict()));

  let b = s.get_employee(b).await.unwrap().unwrap();
  assert_eq!(b.employee_id, "SS-2");
  let a = s.get_employee(a).await.unwrap().unwrap();
  assert_eq!(a.status, Status::Inactive);
}

#[tokio::test]
async fn update_employee_missing_returns_false() {
  let s = store().await;
  let patch = EmployeePatch { name: Some("Ghost".into()), ..EmployeePatch::default() };
  assert!(!s.update_employee(EmployeeId(99), patch).await.unwrap());
  assert!(s.list_employees(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_missing_employee_with_taken_key_conflicts() {
  let s = store().await;
  s.create_employee(employee("A", "SS-1", Status::Active))
    .await
    .unwrap();

  let patch = EmployeePatch {
    employee_id: Some("SS-1".into()),
    ..EmployeePatch::default()
  };
  let err = s.update_employee(EmployeeId(99), patch).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(crewboard_core::Error::DuplicateEmployeeId(_))
  ));
}

#[tokio::test]
async fn update_employee_rejects_blank_surname() {
  let s = store().await;
  let id = s
    .create_employee(employee("A", "SS-1", Status::Active))
    .await
    .unwrap();
  let patch = EmployeePatch { surname: Some("  ".into()), ..EmployeePatch::default() };
  let err = s.update_employee(id, patch).await.unwrap_err();
  assert!(err.domain().is_some_and(|e| e.is_validation()));
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn assign_is_idempotent() {
  let s = store().await;
  let site = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  let emp = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();

  assert!(s.assign(site, emp, None).await.unwrap());
  assert!(!s.assign(site, emp, None).await.unwrap());
  assert_eq!(s.list_by_site(site).await.unwrap(), [emp]);
}

#[tokio::test]
async fn assign_keeps_given_date() {
  let s = store().await;
  let site = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  let emp = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();
  let at = NaiveDate::from_ymd_opt(2024, 4, 2)
    .unwrap()
    .and_hms_opt(7, 0, 0)
    .unwrap();

  s.assign(site, emp, Some(at)).await.unwrap();
  let all = s.list_assignments().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].assignment_date, at);
}

#[tokio::test]
async fn assign_to_missing_parent_returns_false() {
  let s = store().await;
  let site = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  assert!(!s.assign(site, EmployeeId(77), None).await.unwrap());
  assert!(s.list_assignments().await.unwrap().is_empty());
}

#[tokio::test]
async fn unassign_missing_pair_returns_false() {
  let s = store().await;
  let site = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  let emp = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();

  assert!(!s.unassign(site, emp).await.unwrap());
  s.assign(site, emp, None).await.unwrap();
  assert!(s.unassign(site, emp).await.unwrap());
  assert!(s.list_by_site(site).await.unwrap().is_empty());
}

#[tokio::test]
async fn deletes_cascade_to_assignments() {
  let s = store().await;
  let a = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  let b = s.create_site(NewSite::new("B", Status::Active)).await.unwrap();
  let x = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();
  let y = s
    .create_employee(employee("Y", "SS-Y", Status::Active))
    .await
    .unwrap();

  for (site, emp) in [(a, x), (a, y), (b, x), (b, y)] {
    s.assign(site, emp, None).await.unwrap();
  }

  assert!(s.delete_site(a).await.unwrap());
  assert_eq!(s.list_assignments().await.unwrap().len(), 2);

  assert!(s.delete_employee(x).await.unwrap());
  assert_eq!(s.list_by_site(b).await.unwrap(), [y]);
  assert!(!s.delete_employee(x).await.unwrap());
}

#[tokio::test]
async fn clear_keeps_inactive_site_assignments() {
  let s = store().await;
  let active = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  let inactive = s.create_site(NewSite::new("B", Status::Inactive)).await.unwrap();
  let x = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();
  let y = s
    .create_employee(employee("Y", "SS-Y", Status::Inactive))
    .await
    .unwrap();

  s.assign(active, x, None).await.unwrap();
  s.assign(active, y, None).await.unwrap();
  s.assign(inactive, x, None).await.unwrap();

  assert_eq!(s.clear_active_site_assignments().await.unwrap(), 2);
  assert!(s.list_by_site(active).await.unwrap().is_empty());
  assert_eq!(s.list_by_site(inactive).await.unwrap(), [x]);
}

// ─── Seeding and reset ───────────────────────────────────────────────────────

#[tokio::test]
async fn seed_only_fills_empty_tables() {
  let s = store().await;
  assert_eq!(s.seed_demo_data().await.unwrap(), 7);
  assert_eq!(s.seed_demo_data().await.unwrap(), 0);

  let inactive = s.list_employees(Some(Status::Inactive)).await.unwrap();
  assert_eq!(inactive.len(), 1);
  assert_eq!(inactive[0].full_name(), "Roberto Díaz");
  assert_eq!(s.list_sites(Some(Status::Active)).await.unwrap().len(), 3);
}

#[tokio::test]
async fn seed_skips_populated_sites() {
  let s = store().await;
  s.create_site(NewSite::new("Own", Status::Active)).await.unwrap();
  assert_eq!(s.seed_demo_data().await.unwrap(), 4);
  assert_eq!(s.list_sites(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reset_empties_store_and_restarts_ids() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();
  let sites = s.list_sites(None).await.unwrap();
  let emps = s.list_employees(None).await.unwrap();
  s.assign(sites[0].id, emps[0].id, None).await.unwrap();

  s.reset().await.unwrap();
  assert!(s.list_sites(None).await.unwrap().is_empty());
  assert!(s.list_employees(None).await.unwrap().is_empty());
  assert!(s.list_assignments().await.unwrap().is_empty());

  let id = s.create_site(NewSite::new("A", Status::Active)).await.unwrap();
  assert_eq!(id, SiteId(1));
}

// ─── Report over the store ───────────────────────────────────────────────────

#[tokio::test]
async fn snapshot_matches_the_list_reads() {
  let s = store().await;
  s.seed_demo_data().await.unwrap();
  let sites = s.list_sites(None).await.unwrap();
  let emps = s.list_employees(None).await.unwrap();
  s.assign(sites[1].id, emps[2].id, None).await.unwrap();
  s.assign(sites[0].id, emps[0].id, None).await.unwrap();

  let snapshot = s.snapshot().await.unwrap();
  assert_eq!(snapshot.sites, sites);
  assert_eq!(snapshot.employees, emps);
  assert_eq!(snapshot.assignments, s.list_assignments().await.unwrap());
  assert_eq!(snapshot.assignments[0].site_id, sites[1].id);
}

#[tokio::test]
async fn report_scenario_end_to_end() {
  let s = store().await;
  let a = s.create_site(NewSite::new("Site A", Status::Active)).await.unwrap();
  let b = s.create_site(NewSite::new("Site B", Status::Inactive)).await.unwrap();
  let x = s
    .create_employee(employee("X", "SS-X", Status::Active))
    .await
    .unwrap();
  s.create_employee(employee("Y", "SS-Y", Status::Inactive))
    .await
    .unwrap();

  s.assign(a, x, None).await.unwrap();
  let report = Report::generate(&s).await.unwrap();
  let rows = report.export_rows();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].employee_name, "Y Test");
  assert_eq!(rows[0].employee_status, EmployeeLabel::Inactive);
  assert_eq!(rows[1].site.as_deref(), Some("Site A"));
  assert_eq!(rows[1].site_status, Some(Status::Active));
  assert_eq!(rows[1].employee_status, EmployeeLabel::Assigned);

  s.assign(b, x, None).await.unwrap();
  let report = Report::generate(&s).await.unwrap();
  assert_eq!(report.summary().available_count, 0);

  let board = AssignmentBoard::load(&s).await.unwrap();
  assert!(board.available.is_empty());
  assert_eq!(board.columns.len(), 1);
  assert_eq!(board.active_assignments, 1);
}
