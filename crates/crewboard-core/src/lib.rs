//! Core types and trait definitions for Crewboard.
//!
//! Sites, employees, and the assignments between them, plus the report
//! aggregator that joins the three into display and export views. No HTTP or
//! SQL lives here; storage backends implement [`store::WorkforceStore`].

// Backends implement the store trait with plain `async fn`.
#![allow(async_fn_in_trait)]

pub mod assignment;
pub mod board;
pub mod employee;
pub mod error;
pub mod report;
pub mod search;
pub mod site;
pub mod status;
pub mod store;

pub use error::{Error, Result};

/// Trim a text field, treating blank input the same as an absent one.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}
