//! Item — a durable unit of extracted knowledge.
//!
//! An item's identifier is immutable once assigned. The optional stable key
//! is the cross-import identity: a later import carrying the same stable key
//! updates the existing item instead of inserting a duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::ItemTag;

/// Lifecycle status. Items are soft-deleted only; the row is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
  #[default]
  Active,
  Deleted,
}

/// A stored item row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  pub item_id:        String,
  /// The chunk this item was extracted from. Items reference, not own,
  /// their chunk — one chunk may back many items.
  pub chunk_id:       String,
  pub kind:           String,
  /// Versioned shape tag, e.g. `knowledge/howto.v1`.
  pub schema_id:      String,
  pub stable_key:     Option<String>,
  pub title:          String,
  pub body:           String,
  pub domain:         Option<String>,
  pub confidence:     f64,
  pub status:         ItemStatus,
  pub evidence_basis: Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Mutable item fields, shared by the create and update paths.
///
/// On update every field is replaced wholesale; `updated_at` is refreshed by
/// the store and the item identifier never changes.
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
  pub kind:           String,
  pub schema_id:      String,
  pub stable_key:     Option<String>,
  pub title:          String,
  pub body:           String,
  pub domain:         Option<String>,
  pub confidence:     f64,
  pub status:         ItemStatus,
  pub evidence_basis: Option<String>,
}

/// An item together with its payload and tag associations, as returned by
/// the single-item read path.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
  #[serde(flatten)]
  pub item:    Item,
  /// Arbitrary structured data attached 1:1 to the item; replaced wholesale
  /// on every write.
  pub payload: serde_json::Value,
  pub tags:    Vec<ItemTag>,
}
