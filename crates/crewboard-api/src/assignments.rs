//! Handlers for assignment endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `PUT`    | `/sites/{id}/employees/{employee_id}` | Optional body `{"assignment_date": "..."}` |
//! | `DELETE` | `/sites/{id}/employees/{employee_id}` | 404 if the pair is not assigned |
//! | `GET`    | `/assignments` | Every assignment, oldest first |

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
};
use chrono::NaiveDateTime;
use crewboard_core::{
  assignment::Assignment,
  employee::EmployeeId,
  site::SiteId,
  store::WorkforceStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct AssignBody {
  /// Defaults to now. Format: `YYYY-MM-DDTHH:MM:SS`.
  pub assignment_date: Option<NaiveDateTime>,
}

impl AssignBody {
  /// An empty body is the same as `{}`.
  fn parse(raw: &[u8]) -> Result<Self, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self::default());
    }
    serde_json::from_slice(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
  }
}

/// `PUT /sites/{id}/employees/{employee_id}`
///
/// 201 `{"assigned": true}` when a row was inserted, 200
/// `{"assigned": false}` when the pair already existed or either side is
/// missing.
pub async fn assign<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path((site_id, employee_id)): Path<(SiteId, EmployeeId)>,
  body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
  let body = AssignBody::parse(&body)?;
  let assigned = store
    .assign(site_id, employee_id, body.assignment_date)
    .await
    .map_err(ApiError::from_store)?;

  let status = if assigned { StatusCode::CREATED } else { StatusCode::OK };
  Ok((status, Json(json!({ "assigned": assigned }))))
}

/// `DELETE /sites/{id}/employees/{employee_id}`
pub async fn unassign<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path((site_id, employee_id)): Path<(SiteId, EmployeeId)>,
) -> Result<StatusCode, ApiError> {
  if store
    .unassign(site_id, employee_id)
    .await
    .map_err(ApiError::from_store)?
  {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!(
      "employee {employee_id} is not assigned to site {site_id}"
    )))
  }
}

/// `GET /assignments`
pub async fn list<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
  let all = store.list_assignments().await.map_err(ApiError::from_store)?;
  Ok(Json(all))
}
