//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Responses carry a machine-readable reason code: `{"error": "<code>"}`.
//! Storage detail never leaves the process; it is only available to logs via
//! the error's `Display`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A domain condition from the core taxonomy; the variant decides the
  /// HTTP status.
  #[error(transparent)]
  Domain(#[from] lore_core::Error),

  /// A request-shape problem caught before the store is involved.
  #[error("bad request: {0}")]
  BadRequest(&'static str),
}

impl ApiError {
  /// Lift a store error into the API layer through the core taxonomy.
  pub fn from_store<E: Into<lore_core::Error>>(e: E) -> Self {
    Self::Domain(e.into())
  }
}

fn domain_status(e: &lore_core::Error) -> StatusCode {
  use lore_core::Error as E;
  match e {
    E::ItemNotFound(_) | E::JobNotFound(_) | E::CandidateNotFound(_) => {
      StatusCode::NOT_FOUND
    }
    // Historical quirk kept for client compatibility: re-committing a job
    // is a plain 400, while the digest and discard conflicts are 409s.
    E::AlreadyCommitted(_) => StatusCode::BAD_REQUEST,
    E::JobDiscarded(_) | E::ChunkAlreadyExists(_) => StatusCode::CONFLICT,
    E::Validation(_) | E::Serialization(_) => StatusCode::BAD_REQUEST,
    E::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = match &self {
      ApiError::Domain(e) => (domain_status(e), e.reason_code()),
      ApiError::BadRequest(code) => (StatusCode::BAD_REQUEST, *code),
    };
    (status, Json(json!({ "error": code }))).into_response()
  }
}
