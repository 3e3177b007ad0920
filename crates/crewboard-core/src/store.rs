//! The `WorkforceStore` trait: persistence for sites, employees, and
//! assignments. `crewboard-store-sqlite` is the only backend; the API and the
//! report aggregator are written against the trait.
//!
//! "Not found" is never an error here: reads return `None` and mutations
//! return `false` when the target row does not exist.

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{
  assignment::Assignment,
  employee::{Employee, EmployeeId, EmployeePatch, NewEmployee},
  report::Snapshot,
  site::{NewSite, Site, SiteId, SitePatch},
  status::Status,
};

/// Error type of a [`WorkforceStore`] backend.
///
/// Lets callers tell domain failures (validation, conflicts) apart from
/// storage failures without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this failure, if it was one.
  fn domain(&self) -> Option<&crate::Error>;
}

/// Abstraction over a Crewboard persistence backend.
///
/// Every mutation is atomic: uniqueness and cascade rules are enforced by the
/// store itself, not by the caller.
///
/// Futures are `Send` so handlers can hold them across `.await` on a
/// multi-threaded runtime.
pub trait WorkforceStore: Send + Sync {
  type Error: StoreError;

  // ── Sites ─────────────────────────────────────────────────────────────

  /// Validate and persist a new site, returning its generated id.
  fn create_site(
    &self,
    input: NewSite,
  ) -> impl Future<Output = Result<SiteId, Self::Error>> + Send + '_;

  /// Retrieve a site by id. Returns `None` if not found.
  fn get_site(
    &self,
    id: SiteId,
  ) -> impl Future<Output = Result<Option<Site>, Self::Error>> + Send + '_;

  /// List sites in insertion order, optionally filtered by status.
  fn list_sites(
    &self,
    status: Option<Status>,
  ) -> impl Future<Output = Result<Vec<Site>, Self::Error>> + Send + '_;

  /// Apply the `Some` fields of `patch`.
  ///
  /// Returns `false` if the site does not exist. An empty patch returns
  /// `true` without touching the store.
  fn update_site(
    &self,
    id: SiteId,
    patch: SitePatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a site and every assignment referencing it.
  fn delete_site(
    &self,
    id: SiteId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Employees ─────────────────────────────────────────────────────────

  /// Validate and persist a new employee, returning its generated id.
  ///
  /// Fails with [`crate::Error::DuplicateEmployeeId`] if the business key is
  /// taken; nothing is written in that case.
  fn create_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<EmployeeId, Self::Error>> + Send + '_;

  /// Retrieve an employee by id. Returns `None` if not found.
  fn get_employee(
    &self,
    id: EmployeeId,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// List employees in insertion order, optionally filtered by status.
  fn list_employees(
    &self,
    status: Option<Status>,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Apply the `Some` fields of `patch`.
  ///
  /// A new `employee_id` is checked against every *other* employee first.
  /// Returns `false` if the employee does not exist; an empty patch returns
  /// `true`.
  fn update_employee(
    &self,
    id: EmployeeId,
    patch: EmployeePatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete an employee and every assignment referencing them.
  fn delete_employee(
    &self,
    id: EmployeeId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Assignments ───────────────────────────────────────────────────────

  /// Assign an employee to a site.
  ///
  /// Returns `true` if a new row was inserted and `false` if the pair was
  /// already assigned (or either side does not exist). `at` defaults to now.
  fn assign(
    &self,
    site_id: SiteId,
    employee_id: EmployeeId,
    at: Option<NaiveDateTime>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove an assignment. Returns `true` iff a row was removed.
  fn unassign(
    &self,
    site_id: SiteId,
    employee_id: EmployeeId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Ids of the employees assigned to `site_id`, in assignment order.
  fn list_by_site(
    &self,
    site_id: SiteId,
  ) -> impl Future<Output = Result<Vec<EmployeeId>, Self::Error>> + Send + '_;

  /// Every assignment in the store, in assignment order.
  fn list_assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  /// Remove every assignment whose site is [`Status::Active`], returning the
  /// number of rows removed. Assignments to inactive sites are kept.
  fn clear_active_site_assignments(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Every site, employee, and assignment, read as one consistent view so
  /// that a concurrent write cannot land between the three tables.
  fn snapshot(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
