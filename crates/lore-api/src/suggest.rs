//! Prefix-suggestion endpoints for tag names and domains.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  response::IntoResponse,
};
use lore_core::store::CatalogStore;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
  /// Prefix query; empty matches everything.
  #[serde(default)]
  pub q:     String,
  #[serde(default = "default_limit")]
  pub limit: usize,
}

fn default_limit() -> usize { 20 }

impl SuggestParams {
  fn capped_limit(&self) -> usize { self.limit.clamp(1, 100) }
}

/// `GET /suggest/tags?q=<prefix>[&limit=20]`
pub async fn tags<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SuggestParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let names = store
    .suggest_tags(params.q.clone(), params.capped_limit())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "tags": names })))
}

/// `GET /suggest/domains?q=<prefix>[&limit=20]`
pub async fn domains<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SuggestParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let names = store
    .suggest_domains(params.q.clone(), params.capped_limit())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "domains": names })))
}
