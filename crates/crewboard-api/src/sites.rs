//! Handlers for `/sites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/sites` | Optional `?status=Active\|Inactive` and `?q=<text>` |
//! | `POST`   | `/sites` | Body: [`NewSite`]; returns 201 + `{"id": n}` |
//! | `GET`    | `/sites/{id}` | 404 if not found |
//! | `PATCH`  | `/sites/{id}` | Body: [`SitePatch`]; 204, or 404 |
//! | `DELETE` | `/sites/{id}` | Cascades to assignments; 204, or 404 |
//! | `GET`    | `/sites/{id}/employees` | Assigned employee ids |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use crewboard_core::{
  employee::EmployeeId,
  search,
  site::{NewSite, Site, SiteId, SitePatch},
  status::Status,
  store::WorkforceStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Query parameters shared by the site and employee list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub status: Option<Status>,
  /// Case-insensitive substring filter.
  pub q:      Option<String>,
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /sites[?status=<status>][&q=<text>]`
pub async fn list<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Site>>, ApiError> {
  let sites = store
    .list_sites(params.status)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(search::filter(sites, params.q.as_deref())))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /sites`
pub async fn create<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSite>,
) -> Result<impl IntoResponse, ApiError> {
  let id = store.create_site(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /sites/{id}`
pub async fn get_one<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<SiteId>,
) -> Result<Json<Site>, ApiError> {
  let site = store
    .get_site(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("site {id} not found")))?;
  Ok(Json(site))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /sites/{id}`
pub async fn update<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<SiteId>,
  Json(patch): Json<SitePatch>,
) -> Result<StatusCode, ApiError> {
  if store
    .update_site(id, patch)
    .await
    .map_err(ApiError::from_store)?
  {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("site {id} not found")))
  }
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /sites/{id}`
pub async fn delete<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<SiteId>,
) -> Result<StatusCode, ApiError> {
  if store.delete_site(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("site {id} not found")))
  }
}

// ─── Assigned employees ──────────────────────────────────────────────────────

/// `GET /sites/{id}/employees`
pub async fn employees<S: WorkforceStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<SiteId>,
) -> Result<Json<Vec<EmployeeId>>, ApiError> {
  store
    .get_site(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("site {id} not found")))?;

  let ids = store.list_by_site(id).await.map_err(ApiError::from_store)?;
  Ok(Json(ids))
}
