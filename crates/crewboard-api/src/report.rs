//! Handlers for `/report` endpoints. Every request reads a fresh snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};
use crewboard_core::{
  report::{
    DisplayRow, ExportRow, Report, ReportDocument, ReportSummary, ReportTree,
    SiteSummaryRow,
  },
  store::WorkforceStore,
};

use crate::error::ApiError;

async fn generate<S: WorkforceStore>(store: &S) -> Result<Report, ApiError> {
  Report::generate(store).await.map_err(ApiError::from_store)
}

/// `GET /report`
pub async fn tree<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<ReportTree>, ApiError> {
  let report = generate(store.as_ref()).await?;
  Ok(Json(report.tree().clone()))
}

/// `GET /report/rows`
pub async fn rows<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ExportRow>>, ApiError> {
  Ok(Json(generate(store.as_ref()).await?.export_rows()))
}

/// `GET /report/display`
pub async fn display<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<DisplayRow>>, ApiError> {
  Ok(Json(generate(store.as_ref()).await?.display_rows()))
}

/// `GET /report/summary`
pub async fn summary<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<ReportSummary>, ApiError> {
  Ok(Json(generate(store.as_ref()).await?.summary()))
}

/// `GET /report/sites`
pub async fn sites<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SiteSummaryRow>>, ApiError> {
  Ok(Json(generate(store.as_ref()).await?.sites_summary()))
}

/// `GET /report/document`
pub async fn document<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<ReportDocument>, ApiError> {
  Ok(Json(generate(store.as_ref()).await?.document()))
}
