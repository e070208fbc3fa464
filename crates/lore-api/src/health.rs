//! `GET /health` — storage connectivity probe.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use lore_core::store::CatalogStore;
use serde_json::json;

/// Round-trips a trivial query. Degraded storage answers 503 rather than an
/// opaque 500 so load balancers can take the instance out of rotation.
pub async fn handler<S>(State(store): State<Arc<S>>) -> impl IntoResponse
where
  S: CatalogStore,
{
  match store.health_check().await {
    Ok(()) => (
      StatusCode::OK,
      Json(json!({ "status": "ok", "database": "connected" })),
    ),
    Err(_) => (
      StatusCode::SERVICE_UNAVAILABLE,
      Json(json!({ "status": "degraded", "error": "database_error" })),
    ),
  }
}
