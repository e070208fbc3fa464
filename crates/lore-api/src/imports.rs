//! Handlers for the import pipeline endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/import/jobs` | Body: `{"extraction": {...}}`; returns 201 + `{"job_id"}` |
//! | `GET`  | `/import/jobs/{id}` | Job plus its staged candidates |
//! | `PUT`  | `/import/jobs/{id}/candidates/{cid}` | Review edit; frozen after commit/discard |
//! | `POST` | `/import/jobs/{id}/commit` | One-shot; returns the commit report |
//! | `POST` | `/import/jobs/{id}/discard` | Terminal; idempotent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lore_core::{
  import::{CandidateEdit, CommitReport, Extraction},
  store::CatalogStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateJobBody {
  pub extraction: Option<Extraction>,
}

/// `POST /import/jobs` — stage an extraction for review.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateJobBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let extraction = body
    .extraction
    .ok_or(ApiError::BadRequest("missing_extraction"))?;
  let job = store
    .create_import_job(extraction)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "job_id": job.job_id }))))
}

/// `GET /import/jobs/{id}` — the job plus its candidates in staging order.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let job = store
    .get_import_job(job_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| lore_core::Error::JobNotFound(job_id.clone()))?;
  let candidates = store
    .list_candidates(job_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "job": job, "candidates": candidates })))
}

/// `PUT /import/jobs/{id}/candidates/{cid}` — apply a review edit.
pub async fn update_candidate<S>(
  State(store): State<Arc<S>>,
  Path((_job_id, candidate_id)): Path<(String, String)>,
  Json(edit): Json<CandidateEdit>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  store
    .get_candidate(candidate_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| lore_core::Error::CandidateNotFound(candidate_id.clone()))?;
  store
    .update_candidate(candidate_id, edit)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "ok": true })))
}

#[derive(Debug, Serialize)]
struct CommitResponse {
  ok:     bool,
  #[serde(flatten)]
  report: CommitReport,
}

/// `POST /import/jobs/{id}/commit`
pub async fn commit<S>(
  State(store): State<Arc<S>>,
  Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let report = store
    .commit_import_job(job_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(CommitResponse { ok: true, report }))
}

/// `POST /import/jobs/{id}/discard`
pub async fn discard<S>(
  State(store): State<Arc<S>>,
  Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  store
    .get_import_job(job_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| lore_core::Error::JobNotFound(job_id.clone()))?;
  store
    .discard_import_job(job_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "ok": true })))
}
