//! Handlers for `/employees` endpoints.
//!
//! Same shape as `/sites`, plus 409 when a business key is already taken and
//! `GET /employees/available`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use crewboard_core::{
  board::available_employees,
  employee::{Employee, EmployeeId, EmployeePatch, NewEmployee},
  report::Snapshot,
  search,
  store::WorkforceStore,
};
use serde_json::json;

use crate::{error::ApiError, sites::ListParams};

/// `GET /employees[?status=<status>][&q=<text>]`
pub async fn list<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let employees = store
    .list_employees(params.status)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(search::filter(employees, params.q.as_deref())))
}

/// `POST /employees`
pub async fn create<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
  let id = store
    .create_employee(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// `GET /employees/{id}`
pub async fn get_one<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<EmployeeId>,
) -> Result<Json<Employee>, ApiError> {
  let employee = store
    .get_employee(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(employee))
}

/// `PATCH /employees/{id}`
pub async fn update<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<EmployeeId>,
  Json(patch): Json<EmployeePatch>,
) -> Result<StatusCode, ApiError> {
  if store
    .update_employee(id, patch)
    .await
    .map_err(ApiError::from_store)?
  {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("employee {id} not found")))
  }
}

/// `DELETE /employees/{id}`
pub async fn delete<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
  if store
    .delete_employee(id)
    .await
    .map_err(ApiError::from_store)?
  {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("employee {id} not found")))
  }
}

/// `GET /employees/available`: active employees with no assignment at all.
pub async fn available<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let snapshot = Snapshot::load(store.as_ref())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(available_employees(&snapshot)))
}
