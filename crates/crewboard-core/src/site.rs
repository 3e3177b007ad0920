//! Construction sites.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Result, non_blank,
  error::{Entity, Error},
  status::Status,
};

/// Store-assigned site identifier. Strictly increasing; never reused after a
/// site is deleted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SiteId(pub i64);

impl fmt::Display for SiteId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A construction project or location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
  pub id:            SiteId,
  pub name:          String,
  /// Empty when no manager was recorded.
  pub manager:       String,
  pub phone:         Option<String>,
  pub creation_date: NaiveDate,
  pub status:        Status,
}

// ─── NewSite ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::WorkforceStore::create_site`].
///
/// Required fields are optional here so that a missing value surfaces as
/// [`Error::Validation`] instead of failing earlier at deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSite {
  pub name:          Option<String>,
  pub manager:       Option<String>,
  pub phone:         Option<String>,
  /// Defaults to today when absent.
  pub creation_date: Option<NaiveDate>,
  pub status:        Option<Status>,
}

impl NewSite {
  /// A site input with both required fields set.
  pub fn new(name: impl Into<String>, status: Status) -> Self {
    Self {
      name: Some(name.into()),
      status: Some(status),
      ..Self::default()
    }
  }

  pub fn manager(mut self, manager: impl Into<String>) -> Self {
    self.manager = Some(manager.into());
    self
  }

  pub fn phone(mut self, phone: impl Into<String>) -> Self {
    self.phone = Some(phone.into());
    self
  }

  pub fn creation_date(mut self, date: NaiveDate) -> Self {
    self.creation_date = Some(date);
    self
  }

  /// Check required fields and normalise text.
  pub fn validate(self) -> Result<SiteDraft> {
    let name = non_blank(self.name);

    let mut missing = Vec::new();
    if name.is_none() {
      missing.push("name");
    }
    if self.status.is_none() {
      missing.push("status");
    }

    match (name, self.status) {
      (Some(name), Some(status)) => Ok(SiteDraft {
        name,
        manager: self.manager.map(|m| m.trim().to_owned()).unwrap_or_default(),
        phone: non_blank(self.phone),
        creation_date: self.creation_date,
        status,
      }),
      _ => Err(Error::Validation { entity: Entity::Site, missing }),
    }
  }
}

/// A validated [`NewSite`], ready to be written by a store.
#[derive(Debug, Clone)]
pub struct SiteDraft {
  pub name:          String,
  pub manager:       String,
  pub phone:         Option<String>,
  pub creation_date: Option<NaiveDate>,
  pub status:        Status,
}

// ─── SitePatch ───────────────────────────────────────────────────────────────

/// Partial update for a site. Only `Some` fields are written; the id is not
/// part of the patch and can never change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitePatch {
  pub name:          Option<String>,
  pub manager:       Option<String>,
  pub phone:         Option<String>,
  pub creation_date: Option<NaiveDate>,
  pub status:        Option<Status>,
}

impl SitePatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.manager.is_none()
      && self.phone.is_none()
      && self.creation_date.is_none()
      && self.status.is_none()
  }

  /// Reject a patch that would blank out the site name.
  pub fn validate(&self) -> Result<()> {
    if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(Error::Validation {
        entity:  Entity::Site,
        missing: vec!["name"],
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_fields_are_all_reported() {
    let err = NewSite::default().validate().unwrap_err();
    match err {
      Error::Validation { entity, missing } => {
        assert_eq!(entity, Entity::Site);
        assert_eq!(missing, ["name", "status"]);
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn blank_name_counts_as_missing() {
    let err = NewSite::new("   ", Status::Active).validate().unwrap_err();
    assert!(err.is_validation());
  }

  #[test]
  fn validate_trims_and_drops_blank_phone() {
    let draft = NewSite::new("  Central Building ", Status::Active)
      .manager(" Carlos Ruiz ")
      .phone("  ")
      .validate()
      .unwrap();
    assert_eq!(draft.name, "Central Building");
    assert_eq!(draft.manager, "Carlos Ruiz");
    assert_eq!(draft.phone, None);
  }

  #[test]
  fn patch_with_blank_name_is_rejected() {
    let patch = SitePatch {
      name: Some(String::new()),
      ..SitePatch::default()
    };
    assert!(patch.validate().unwrap_err().is_validation());
    assert!(SitePatch::default().is_empty());
  }
}
