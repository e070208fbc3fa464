//! Tags — named, optionally hierarchical labels shared across items.
//!
//! Tag identity is the (name, path) pair. Items associate to tags with a
//! per-association confidence; an item's tag set is always replaced
//! wholesale, never patched.

use serde::{Deserialize, Serialize};

/// A tag reference as supplied by callers (item bodies, import candidates).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagDraft {
  pub name:       String,
  #[serde(default)]
  pub path:       Option<String>,
  #[serde(default)]
  pub confidence: f64,
}

/// A tag association as returned on item reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTag {
  pub name:       String,
  pub path:       String,
  pub confidence: f64,
}
