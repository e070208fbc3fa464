//! Search query and result types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result ordering. Relevance only applies when a free-text query is
/// present; without one it falls back to last-updated ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSort {
  #[default]
  Relevance,
  Created,
  Updated,
}

impl SearchSort {
  /// Parse a sort parameter. Anything other than `relevance` or `created`
  /// maps to last-updated ordering.
  pub fn parse(s: &str) -> Self {
    match s {
      "relevance" => Self::Relevance,
      "created" => Self::Created,
      _ => Self::Updated,
    }
  }
}

/// Parameters for [`crate::store::CatalogStore::search`].
///
/// Structured filters combine with AND; the tag filter requires an item to
/// carry *all* listed tag names.
#[derive(Debug, Clone)]
pub struct SearchQuery {
  pub text:   Option<String>,
  pub kinds:  Vec<String>,
  pub domain: Option<String>,
  pub tags:   Vec<String>,
  pub sort:   SearchSort,
  pub limit:  usize,
  pub offset: usize,
}

impl Default for SearchQuery {
  fn default() -> Self {
    Self {
      text:   None,
      kinds:  Vec::new(),
      domain: None,
      tags:   Vec::new(),
      sort:   SearchSort::default(),
      limit:  20,
      offset: 0,
    }
  }
}

/// One search result row. `tags` is always materialised — empty, not null,
/// when the item has no tags.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
  pub item_id:    String,
  pub kind:       String,
  pub schema_id:  String,
  pub title:      String,
  pub body:       String,
  pub domain:     Option<String>,
  pub confidence: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub tags:       Vec<String>,
}

/// A page of results plus the full match count irrespective of pagination.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
  pub total: usize,
  pub items: Vec<SearchHit>,
}
