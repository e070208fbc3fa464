//! `GET /search` — full-text + structured catalog search.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use lore_core::{
  search::{SearchQuery, SearchResults, SearchSort},
  store::CatalogStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  /// Free-text query. Optional; without it results are a recency listing.
  pub q:      Option<String>,
  /// Comma-separated kind filter.
  pub kinds:  Option<String>,
  pub domain: Option<String>,
  /// Comma-separated tag names; an item must carry all of them.
  pub tags:   Option<String>,
  #[serde(default = "default_sort")]
  pub sort:   String,
  #[serde(default = "default_limit")]
  pub limit:  usize,
  #[serde(default)]
  pub offset: usize,
}

fn default_sort() -> String { "relevance".to_owned() }
fn default_limit() -> usize { 20 }

fn split_csv(value: Option<&str>) -> Vec<String> {
  value
    .map(|v| {
      v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
    })
    .unwrap_or_default()
}

impl From<SearchParams> for SearchQuery {
  fn from(p: SearchParams) -> Self {
    SearchQuery {
      kinds: split_csv(p.kinds.as_deref()),
      tags: split_csv(p.tags.as_deref()),
      domain: p.domain,
      sort: SearchSort::parse(&p.sort),
      limit: p.limit.clamp(1, 100),
      offset: p.offset,
      text: p.q,
    }
  }
}

/// `GET /search?q=...&kinds=a,b&domain=...&tags=x,y&sort=relevance&limit=20&offset=0`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError>
where
  S: CatalogStore,
{
  let query = SearchQuery::from(params);
  let results = store
    .search(&query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(results))
}

#[cfg(test)]
mod tests {
  use super::split_csv;

  #[test]
  fn csv_splitting_trims_and_drops_empties() {
    assert_eq!(split_csv(Some("a, b ,,c")), vec!["a", "b", "c"]);
    assert!(split_csv(Some("  ")).is_empty());
    assert!(split_csv(None).is_empty());
  }
}
