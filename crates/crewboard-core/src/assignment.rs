//! Assignments: which employees work on which sites.
//!
//! A pair appears at most once (enforced by the store). One employee may be
//! assigned to several sites at the same time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{employee::EmployeeId, site::SiteId};

/// One employee assigned to one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub site_id:         SiteId,
  pub employee_id:     EmployeeId,
  pub assignment_date: NaiveDateTime,
}
