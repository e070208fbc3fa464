//! Links — directed, typed edges between items.
//!
//! The target is identified by `target_key`: normally a permanent item
//! identifier, but possibly an unresolved external key. Duplicate edges are
//! permitted by design; deletion is explicit and by link identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored link row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
  pub link_id:    String,
  pub item_id:    String,
  /// Relation type, e.g. `related`, `supersedes`.
  pub rel:        String,
  pub target_key: String,
  pub note:       Option<String>,
  pub confidence: f64,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::CatalogStore::create_link`].
/// `link_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLink {
  pub item_id:    String,
  pub rel:        String,
  pub target_key: String,
  pub note:       Option<String>,
  pub confidence: f64,
}

/// A link with target item metadata left-joined in. A dangling target (not
/// yet imported, or an external key) yields `None` target fields rather than
/// an error.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLink {
  #[serde(flatten)]
  pub link:         Link,
  pub target_title: Option<String>,
  pub target_kind:  Option<String>,
}
