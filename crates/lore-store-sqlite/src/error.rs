//! Error type for `lore-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain condition from the core taxonomy (not-found, conflict, ...).
  #[error(transparent)]
  Domain(#[from] lore_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value outside the expected enumeration.
  #[error("unexpected column value: {0}")]
  Decode(String),
}

/// Collapse into the core taxonomy. Database and decode failures become the
/// generic storage signal; the detail stays available for logging via
/// `Display` but is not part of the caller-visible condition.
impl From<Error> for lore_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Domain(inner) => inner,
      Error::Database(inner) => lore_core::Error::Storage(inner.to_string()),
      Error::Json(inner) => lore_core::Error::Serialization(inner),
      Error::DateParse(m) | Error::Decode(m) => lore_core::Error::Storage(m),
    }
  }
}

/// Box an arbitrary error so it can cross a `tokio_rusqlite::Connection::call`
/// boundary, which only transports `tokio_rusqlite::Error`.
pub(crate) fn boxed(
  e: impl std::error::Error + Send + Sync + 'static,
) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
