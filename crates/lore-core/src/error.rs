//! The unified error taxonomy for the Lore catalog.
//!
//! Storage backends convert their internal failures into these variants so
//! that callers (and the HTTP layer) see one stable set of conditions:
//! not-found, conflict, validation, storage, serialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  // ── Not found ─────────────────────────────────────────────────────────
  #[error("item not found: {0}")]
  ItemNotFound(String),

  #[error("import job not found: {0}")]
  JobNotFound(String),

  #[error("import candidate not found: {0}")]
  CandidateNotFound(String),

  // ── Conflict ──────────────────────────────────────────────────────────
  #[error("import job {0} is already committed")]
  AlreadyCommitted(String),

  #[error("import job {0} was discarded")]
  JobDiscarded(String),

  /// A chunk with this digest was already ingested by an earlier job.
  #[error("a chunk with digest {0} already exists")]
  ChunkAlreadyExists(String),

  // ── Validation ────────────────────────────────────────────────────────
  #[error("invalid request: {0}")]
  Validation(String),

  // ── Infrastructure ────────────────────────────────────────────────────
  /// Transaction or connectivity failure in the storage engine. Treated as
  /// transient by callers; the message is for logs, not API responses.
  #[error("storage unavailable: {0}")]
  Storage(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Short machine-readable reason code surfaced to API clients.
  pub fn reason_code(&self) -> &'static str {
    match self {
      Self::ItemNotFound(_) => "item_not_found",
      Self::JobNotFound(_) => "job_not_found",
      Self::CandidateNotFound(_) => "candidate_not_found",
      Self::AlreadyCommitted(_) => "already_committed",
      Self::JobDiscarded(_) => "job_discarded",
      Self::ChunkAlreadyExists(_) => "chunk_already_exists",
      Self::Validation(_) => "invalid_request",
      Self::Storage(_) => "database_error",
      Self::Serialization(_) => "invalid_payload",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
