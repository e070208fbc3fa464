//! SQLite backend for the Lore knowledge catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. The bundled SQLite build ships
//! FTS5, which backs the search index over item titles and bodies.

mod encode;
mod import;
mod schema;
mod search;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
