//! Error type for `crewboard-store-sqlite`.

use crewboard_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] crewboard_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value the domain cannot represent.
  #[error("invalid stored data: {0}")]
  InvalidData(String),
}

impl StoreError for Error {
  fn domain(&self) -> Option<&crewboard_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
