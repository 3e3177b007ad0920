//! Handlers for the assignment board.

use std::sync::Arc;

use axum::{Json, extract::State};
use crewboard_core::{board::AssignmentBoard, store::WorkforceStore};
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /board`
pub async fn show<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<AssignmentBoard>, ApiError> {
  let board = AssignmentBoard::load(store.as_ref())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(board))
}

/// `POST /board/clear`: drop every assignment on an active site.
pub async fn clear<S: WorkforceStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError> {
  let removed = store
    .clear_active_site_assignments()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "removed": removed })))
}
