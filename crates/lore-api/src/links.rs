//! Handlers for link endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/items/{id}/links` | Outbound links with targets resolved |
//! | `POST`   | `/items/{id}/links` | Body: [`LinkBody`]; returns 201 + `{"link_id"}` |
//! | `DELETE` | `/links/{id}` | Unconditional; deleting an absent link is a no-op |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lore_core::{link::NewLink, store::CatalogStore};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// `GET /items/{id}/links`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let links = store
    .list_links(item_id, true)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "links": links })))
}

/// JSON body accepted by `POST /items/{id}/links`. The target may be a
/// permanent item id or an unresolved external key.
#[derive(Debug, Deserialize)]
pub struct LinkBody {
  pub rel:            String,
  pub target_item_id: String,
  #[serde(default)]
  pub note:           Option<String>,
  #[serde(default)]
  pub confidence:     f64,
}

/// `POST /items/{id}/links`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(item_id): Path<String>,
  Json(body): Json<LinkBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let link = store
    .create_link(NewLink {
      item_id,
      rel: body.rel,
      target_key: body.target_item_id,
      note: body.note,
      confidence: body.confidence,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(json!({ "link_id": link.link_id }))))
}

/// `DELETE /links/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(link_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  store
    .delete_link(link_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "ok": true })))
}
