//! Case-insensitive substring search over sites and employees.
//!
//! Sites match on their name; employees on their full name.

use crate::{employee::Employee, site::Site};

/// A record that can be found by free-text search.
pub trait Searchable {
  fn search_text(&self) -> String;

  fn matches(&self, term: &str) -> bool {
    self
      .search_text()
      .to_lowercase()
      .contains(&term.trim().to_lowercase())
  }
}

impl Searchable for Site {
  fn search_text(&self) -> String { self.name.clone() }
}

impl Searchable for Employee {
  fn search_text(&self) -> String { self.full_name() }
}

/// Keep only the items matching `term`. A missing or blank term keeps all.
pub fn filter<T: Searchable>(items: Vec<T>, term: Option<&str>) -> Vec<T> {
  match term.map(str::trim) {
    Some(t) if !t.is_empty() => items.into_iter().filter(|i| i.matches(t)).collect(),
    _ => items,
  }
}
