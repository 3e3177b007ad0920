//! JSON REST API for Crewboard.
//!
//! Routes for sites, employees, assignments, the board, and reports, served
//! from any [`crewboard_core::store::WorkforceStore`]. There is no auth; put
//! the router behind whatever the deployment needs.
//!
//! ```rust,ignore
//! let app = Router::new().nest("/api", crewboard_api::api_router(store));
//! ```

pub mod assignments;
pub mod board;
pub mod employees;
pub mod error;
pub mod report;
pub mod sites;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use crewboard_core::store::WorkforceStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// The API router over `store`, with request tracing.
///
/// State is already applied, so the router nests under any parent.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: WorkforceStore + 'static,
{
  Router::new()
    // Sites
    .route("/sites", get(sites::list::<S>).post(sites::create::<S>))
    .route(
      "/sites/{id}",
      get(sites::get_one::<S>)
        .patch(sites::update::<S>)
        .delete(sites::delete::<S>),
    )
    .route("/sites/{id}/employees", get(sites::employees::<S>))
    .route(
      "/sites/{id}/employees/{employee_id}",
      put(assignments::assign::<S>).delete(assignments::unassign::<S>),
    )
    // Employees
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route("/employees/available", get(employees::available::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .patch(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    // Assignments and board
    .route("/assignments", get(assignments::list::<S>))
    .route("/board", get(board::show::<S>))
    .route("/board/clear", post(board::clear::<S>))
    // Reports
    .route("/report", get(report::tree::<S>))
    .route("/report/rows", get(report::rows::<S>))
    .route("/report/display", get(report::display::<S>))
    .route("/report/summary", get(report::summary::<S>))
    .route("/report/sites", get(report::sites::<S>))
    .route("/report/document", get(report::document::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
