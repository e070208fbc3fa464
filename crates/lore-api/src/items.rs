//! Handlers for `/items` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/items` | Body: [`ItemBody`]; returns 201 + `{"item_id"}` |
//! | `GET`    | `/items/{id}` | Item with payload and tags |
//! | `PUT`    | `/items/{id}` | Full-field replace; 404 if absent |
//! | `DELETE` | `/items/{id}` | Soft delete; 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lore_core::{
  chunk::ChunkProvenance,
  item::{ItemFields, ItemStatus},
  store::CatalogStore,
  tag::TagDraft,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

/// JSON body accepted by `POST /items` and `PUT /items/{id}`.
///
/// Provenance fields (`thread_id`, `digest`, `chunk_id`, ...) are flattened
/// at the top level and drive chunk resolution on create. `payload` and
/// `tags` are replaced wholesale on every write.
#[derive(Debug, Deserialize)]
pub struct ItemBody {
  pub kind:       String,
  pub schema_id:  String,
  pub title:      String,
  pub body:       String,
  #[serde(default)]
  pub stable_key: Option<String>,
  #[serde(default)]
  pub domain:     Option<String>,
  #[serde(default)]
  pub confidence: f64,
  /// Only meaningful on update; creates are always `active`.
  #[serde(default)]
  pub status:     Option<ItemStatus>,
  #[serde(default)]
  pub evidence:   Value,
  #[serde(default)]
  pub payload:    Value,
  #[serde(default)]
  pub tags:       Vec<TagDraft>,
  #[serde(flatten)]
  pub provenance: ChunkProvenance,
}

fn to_fields(body: &ItemBody) -> Result<ItemFields, ApiError> {
  let evidence_basis = if body.evidence.is_null() {
    "{}".to_owned()
  } else {
    serde_json::to_string(&body.evidence)
      .map_err(lore_core::Error::from)?
  };
  Ok(ItemFields {
    kind:           body.kind.clone(),
    schema_id:      body.schema_id.clone(),
    stable_key:     body.stable_key.clone(),
    title:          body.title.clone(),
    body:           body.body.clone(),
    domain:         body.domain.clone(),
    confidence:     body.confidence,
    status:         body.status.unwrap_or_default(),
    evidence_basis: Some(evidence_basis),
  })
}

/// `POST /items` — resolves the chunk, inserts the item, then attaches
/// payload and tags.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ItemBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let mut fields = to_fields(&body)?;
  fields.status = ItemStatus::Active;

  let chunk_id = store
    .ensure_chunk(None, body.provenance.clone())
    .await
    .map_err(ApiError::from_store)?;
  let item = store
    .create_item(chunk_id, fields)
    .await
    .map_err(ApiError::from_store)?;
  store
    .set_payload(item.item_id.clone(), body.payload)
    .await
    .map_err(ApiError::from_store)?;
  store
    .replace_item_tags(item.item_id.clone(), body.tags)
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::CREATED, Json(json!({ "item_id": item.item_id }))))
}

/// `GET /items/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let detail = store
    .get_item(item_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or(lore_core::Error::ItemNotFound(item_id))?;
  Ok(Json(json!({ "item": detail })))
}

/// `PUT /items/{id}` — full-field replace plus payload and tag replace.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(item_id): Path<String>,
  Json(body): Json<ItemBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  store
    .get_item(item_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| lore_core::Error::ItemNotFound(item_id.clone()))?;

  let fields = to_fields(&body)?;
  store
    .update_item(item_id.clone(), fields, None)
    .await
    .map_err(ApiError::from_store)?;
  store
    .set_payload(item_id.clone(), body.payload)
    .await
    .map_err(ApiError::from_store)?;
  store
    .replace_item_tags(item_id, body.tags)
    .await
    .map_err(ApiError::from_store)?;

  Ok(Json(json!({ "ok": true })))
}

/// `DELETE /items/{id}` — soft delete; the row is retained.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  store
    .get_item(item_id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| lore_core::Error::ItemNotFound(item_id.clone()))?;
  store
    .soft_delete_item(item_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "ok": true })))
}
