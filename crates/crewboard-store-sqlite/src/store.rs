//! [`SqliteStore`], the SQLite [`WorkforceStore`].

use std::{path::Path, time::Duration};

use chrono::{Local, NaiveDateTime};
use rusqlite::{OptionalExtension as _, types::Value};
use tracing::{debug, info, warn};

use crewboard_core::{
  Error as CoreError,
  assignment::Assignment,
  employee::{Employee, EmployeeId, EmployeePatch, NewEmployee},
  report::Snapshot,
  site::{NewSite, Site, SiteId, SitePatch},
  status::Status,
  store::WorkforceStore,
};

use crate::{
  Result,
  encode::{
    ASSIGNMENT_COLUMNS, EMPLOYEE_COLUMNS, RawAssignment, RawEmployee, RawSite,
    SITE_COLUMNS, encode_date, encode_datetime, encode_status,
  },
  schema::SCHEMA,
  seed,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a write guarded by the employee business-key check.
enum Keyed<T> {
  Written(T),
  Taken,
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

fn key_taken(
  conn: &rusqlite::Connection,
  key: &str,
  except: Option<i64>,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM employees WHERE employee_id = ?1 AND id IS NOT ?2",
        rusqlite::params![key, except],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}

fn select_sites(
  conn: &rusqlite::Connection,
  status: Option<&str>,
) -> rusqlite::Result<Vec<RawSite>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {SITE_COLUMNS} FROM construction_sites
     WHERE ?1 IS NULL OR status = ?1
     ORDER BY id"
  ))?;
  stmt
    .query_map(rusqlite::params![status], RawSite::from_row)?
    .collect()
}

fn select_employees(
  conn: &rusqlite::Connection,
  status: Option<&str>,
) -> rusqlite::Result<Vec<RawEmployee>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {EMPLOYEE_COLUMNS} FROM employees
     WHERE ?1 IS NULL OR status = ?1
     ORDER BY id"
  ))?;
  stmt
    .query_map(rusqlite::params![status], RawEmployee::from_row)?
    .collect()
}

fn select_assignments(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawAssignment>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {ASSIGNMENT_COLUMNS} FROM assignments ORDER BY id"
  ))?;
  stmt.query_map([], RawAssignment::from_row)?.collect()
}

/// `UPDATE <table> SET a = ?1, b = ?2 ... WHERE id = ?n`, returning whether a
/// row matched.
fn apply_changes(
  conn: &rusqlite::Connection,
  table: &str,
  id: i64,
  changes: Vec<(&'static str, Value)>,
) -> rusqlite::Result<bool> {
  let set = changes
    .iter()
    .enumerate()
    .map(|(i, (col, _))| format!("{col} = ?{}", i + 1))
    .collect::<Vec<_>>()
    .join(", ");
  let sql = format!("UPDATE {table} SET {set} WHERE id = ?{}", changes.len() + 1);

  let params = changes
    .into_iter()
    .map(|(_, v)| v)
    .chain(std::iter::once(Value::Integer(id)));
  Ok(conn.execute(&sql, rusqlite::params_from_iter(params))? > 0)
}

fn text(v: String) -> Value { Value::Text(v.trim().to_owned()) }

fn optional_text(v: String) -> Value {
  let v = v.trim();
  if v.is_empty() { Value::Null } else { Value::Text(v.to_owned()) }
}

fn site_changes(patch: SitePatch) -> Vec<(&'static str, Value)> {
  let mut changes = Vec::new();
  if let Some(v) = patch.name {
    changes.push(("name", text(v)));
  }
  if let Some(v) = patch.manager {
    changes.push(("manager", text(v)));
  }
  if let Some(v) = patch.phone {
    changes.push(("phone", optional_text(v)));
  }
  if let Some(v) = patch.creation_date {
    changes.push(("creation_date", Value::Text(encode_date(v))));
  }
  if let Some(v) = patch.status {
    changes.push(("status", Value::Text(encode_status(v).to_owned())));
  }
  changes
}

fn employee_changes(patch: EmployeePatch) -> Vec<(&'static str, Value)> {
  let mut changes = Vec::new();
  if let Some(v) = patch.name {
    changes.push(("name", text(v)));
  }
  if let Some(v) = patch.surname {
    changes.push(("surname", text(v)));
  }
  if let Some(v) = patch.employee_id {
    changes.push(("employee_id", text(v)));
  }
  if let Some(v) = patch.creation_date {
    changes.push(("creation_date", Value::Text(encode_date(v))));
  }
  if let Some(v) = patch.status {
    changes.push(("status", Value::Text(encode_status(v).to_owned())));
  }
  changes
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Crewboard store over one SQLite connection.
///
/// Clones share the connection and its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the database file at `path`, creating it and its tables if needed.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_owned();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// A private in-memory store. Used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fill empty tables with demo data, returning the number of rows
  /// inserted.
  ///
  /// Sites are seeded only when there are no sites, and employees only when
  /// there are no employees. Nothing is assigned.
  pub async fn seed_demo_data(&self) -> Result<usize> {
    let inserted = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let mut inserted = 0;

        let sites: i64 =
          tx.query_row("SELECT COUNT(*) FROM construction_sites", [], |r| r.get(0))?;
        if sites == 0 {
          for s in seed::SITES {
            inserted += tx.execute(
              "INSERT INTO construction_sites
                 (name, manager, phone, creation_date, status)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![
                s.name,
                s.manager,
                s.phone,
                s.creation_date,
                encode_status(s.status),
              ],
            )?;
          }
        }

        let employees: i64 =
          tx.query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))?;
        if employees == 0 {
          for e in seed::EMPLOYEES {
            inserted += tx.execute(
              "INSERT INTO employees
                 (name, surname, employee_id, creation_date, status)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![
                e.name,
                e.surname,
                e.employee_id,
                e.creation_date,
                encode_status(e.status),
              ],
            )?;
          }
        }

        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    if inserted > 0 {
      info!(rows = inserted, "seeded demo data");
    }
    Ok(inserted)
  }

  /// Delete every assignment, employee, and site, and restart id numbering.
  pub async fn reset(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM assignments;
           DELETE FROM employees;
           DELETE FROM construction_sites;
           DELETE FROM sqlite_sequence
             WHERE name IN ('assignments', 'employees', 'construction_sites');",
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    info!("store reset");
    Ok(())
  }
}

// ─── WorkforceStore impl ─────────────────────────────────────────────────────

impl WorkforceStore for SqliteStore {
  type Error = crate::Error;

  // ── Sites ─────────────────────────────────────────────────────────────────

  async fn create_site(&self, input: NewSite) -> Result<SiteId> {
    let draft = input.validate()?;
    let date = encode_date(
      draft
        .creation_date
        .unwrap_or_else(|| Local::now().date_naive()),
    );
    let status = encode_status(draft.status);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO construction_sites
             (name, manager, phone, creation_date, status)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![draft.name, draft.manager, draft.phone, date, status],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(site = id, "created site");
    Ok(SiteId(id))
  }

  async fn get_site(&self, id: SiteId) -> Result<Option<Site>> {
    let raw: Option<RawSite> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SITE_COLUMNS} FROM construction_sites WHERE id = ?1"),
              rusqlite::params![id.0],
              RawSite::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSite::into_site).transpose()
  }

  async fn list_sites(&self, status: Option<Status>) -> Result<Vec<Site>> {
    let status = status.map(encode_status);

    let raws = self
      .conn
      .call(move |conn| Ok(select_sites(conn, status)?))
      .await?;

    raws.into_iter().map(RawSite::into_site).collect()
  }

  async fn update_site(&self, id: SiteId, patch: SitePatch) -> Result<bool> {
    patch.validate()?;
    if patch.is_empty() {
      return Ok(true);
    }
    let changes = site_changes(patch);

    let updated = self
      .conn
      .call(move |conn| Ok(apply_changes(conn, "construction_sites", id.0, changes)?))
      .await?;

    debug!(site = %id, updated, "updated site");
    Ok(updated)
  }

  async fn delete_site(&self, id: SiteId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(
          conn.execute(
            "DELETE FROM construction_sites WHERE id = ?1",
            rusqlite::params![id.0],
          )? > 0,
        )
      })
      .await?;

    debug!(site = %id, deleted, "deleted site");
    Ok(deleted)
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn create_employee(&self, input: NewEmployee) -> Result<EmployeeId> {
    let draft = input.validate()?;
    let key = draft.employee_id.clone();
    let date = encode_date(
      draft
        .creation_date
        .unwrap_or_else(|| Local::now().date_naive()),
    );
    let status = encode_status(draft.status);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if key_taken(&tx, &draft.employee_id, None)? {
          return Ok(Keyed::Taken);
        }
        tx.execute(
          "INSERT INTO employees
             (name, surname, employee_id, creation_date, status)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![draft.name, draft.surname, draft.employee_id, date, status],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Keyed::Written(id))
      })
      .await?;

    match outcome {
      Keyed::Written(id) => {
        debug!(employee = id, "created employee");
        Ok(EmployeeId(id))
      }
      Keyed::Taken => Err(CoreError::DuplicateEmployeeId(key).into()),
    }
  }

  async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
              rusqlite::params![id.0],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self, status: Option<Status>) -> Result<Vec<Employee>> {
    let status = status.map(encode_status);

    let raws = self
      .conn
      .call(move |conn| Ok(select_employees(conn, status)?))
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn update_employee(&self, id: EmployeeId, patch: EmployeePatch) -> Result<bool> {
    patch.validate()?;
    let key = patch.employee_id.as_deref().map(|k| k.trim().to_owned());
    if patch.is_empty() {
      return Ok(true);
    }
    let changes = employee_changes(patch);

    let check = key.clone();
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(key) = &check
          && key_taken(&tx, key, Some(id.0))?
        {
          return Ok(Keyed::Taken);
        }
        let updated = apply_changes(&tx, "employees", id.0, changes)?;
        tx.commit()?;
        Ok(Keyed::Written(updated))
      })
      .await?;

    match outcome {
      Keyed::Written(updated) => {
        debug!(employee = %id, updated, "updated employee");
        Ok(updated)
      }
      Keyed::Taken => {
        Err(CoreError::DuplicateEmployeeId(key.unwrap_or_default()).into())
      }
    }
  }

  async fn delete_employee(&self, id: EmployeeId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(
          conn.execute("DELETE FROM employees WHERE id = ?1", rusqlite::params![id.0])?
            > 0,
        )
      })
      .await?;

    debug!(employee = %id, deleted, "deleted employee");
    Ok(deleted)
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  async fn assign(
    &self,
    site_id: SiteId,
    employee_id: EmployeeId,
    at: Option<NaiveDateTime>,
  ) -> Result<bool> {
    let at = encode_datetime(at.unwrap_or_else(|| Local::now().naive_local()));

    // `None` when a foreign key rejected the pair.
    let inserted: Option<bool> = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT OR IGNORE INTO assignments (site_id, employee_id, assignment_date)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![site_id.0, employee_id.0, at],
        ) {
          Ok(n) => Ok(Some(n > 0)),
          Err(e) if is_constraint_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match inserted {
      Some(inserted) => {
        debug!(site = %site_id, employee = %employee_id, inserted, "assign");
        Ok(inserted)
      }
      None => {
        warn!(
          site = %site_id,
          employee = %employee_id,
          "assignment rejected: site or employee does not exist"
        );
        Ok(false)
      }
    }
  }

  async fn unassign(&self, site_id: SiteId, employee_id: EmployeeId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(
          conn.execute(
            "DELETE FROM assignments WHERE site_id = ?1 AND employee_id = ?2",
            rusqlite::params![site_id.0, employee_id.0],
          )? > 0,
        )
      })
      .await?;

    debug!(site = %site_id, employee = %employee_id, removed, "unassign");
    Ok(removed)
  }

  async fn list_by_site(&self, site_id: SiteId) -> Result<Vec<EmployeeId>> {
    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT employee_id FROM assignments WHERE site_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![site_id.0], |row| row.get::<_, i64>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().map(EmployeeId).collect())
  }

  async fn list_assignments(&self) -> Result<Vec<Assignment>> {
    let raws = self
      .conn
      .call(|conn| Ok(select_assignments(conn)?))
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }

  async fn clear_active_site_assignments(&self) -> Result<usize> {
    let removed = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute(
          "DELETE FROM assignments
           WHERE site_id IN (
             SELECT id FROM construction_sites WHERE status = 'Active'
           )",
          [],
        )?;
        tx.commit()?;
        Ok(removed)
      })
      .await?;

    info!(removed, "cleared assignments on active sites");
    Ok(removed)
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    let (sites, employees, assignments) = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let sites = select_sites(&tx, None)?;
        let employees = select_employees(&tx, None)?;
        let assignments = select_assignments(&tx)?;
        tx.commit()?;
        Ok((sites, employees, assignments))
      })
      .await?;

    Ok(Snapshot {
      sites:       sites.into_iter().map(RawSite::into_site).collect::<Result<_>>()?,
      employees:   employees
        .into_iter()
        .map(RawEmployee::into_employee)
        .collect::<Result<_>>()?,
      assignments: assignments
        .into_iter()
        .map(RawAssignment::into_assignment)
        .collect::<Result<_>>()?,
    })
  }
}
