//! Chunk — the provenance record for one ingested unit of source content.
//!
//! Chunks are keyed by content digest: re-submitting identical source
//! material updates the existing chunk in place instead of creating a
//! duplicate. Chunks are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source type recorded when the caller does not supply one.
pub const DEFAULT_SOURCE_TYPE: &str = "chatgpt_export_json";

/// A stored chunk row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
  pub chunk_id:    String,
  pub thread_id:   String,
  pub source_type: String,
  pub time_start:  Option<String>,
  pub time_end:    Option<String>,
  /// Content digest — unique across all chunks.
  pub digest:      String,
  /// Opaque structured pointer back to the raw source.
  pub locator:     serde_json::Value,
  pub hint:        Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Caller-supplied provenance used to resolve or create a chunk.
///
/// Every field is optional; the store applies defaults. A missing `digest`
/// falls back to a synthetic per-chunk value, which defeats dedup and is a
/// degraded mode only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkProvenance {
  #[serde(default)]
  pub thread_id:   Option<String>,
  #[serde(default)]
  pub source_type: Option<String>,
  #[serde(default)]
  pub chunk_id:    Option<String>,
  #[serde(default)]
  pub digest:      Option<String>,
  #[serde(default)]
  pub locator:     serde_json::Value,
  #[serde(default)]
  pub time_start:  Option<String>,
  #[serde(default)]
  pub time_end:    Option<String>,
  #[serde(default)]
  pub hint:        Option<String>,
}
