//! SQLite backend for the Crewboard workforce store.
//!
//! Every query runs on the [`tokio_rusqlite`] connection thread, off the async
//! runtime. Operations that touch more than one row set run as one
//! transaction there.

mod encode;
mod schema;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
