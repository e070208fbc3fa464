//! JSON REST API for Lore.
//!
//! Exposes an axum [`Router`] backed by any [`lore_core::store::CatalogStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lore_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod health;
pub mod imports;
pub mod items;
pub mod links;
pub mod search;
pub mod suggest;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use lore_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Health
    .route("/health", get(health::handler::<S>))
    // Items
    .route("/items", post(items::create::<S>))
    .route(
      "/items/{id}",
      get(items::get_one::<S>)
        .put(items::update_one::<S>)
        .delete(items::delete_one::<S>),
    )
    // Links
    .route(
      "/items/{id}/links",
      get(links::list::<S>).post(links::create::<S>),
    )
    .route("/links/{id}", delete(links::delete_one::<S>))
    // Suggestions
    .route("/suggest/tags", get(suggest::tags::<S>))
    .route("/suggest/domains", get(suggest::domains::<S>))
    // Search
    .route("/search", get(search::handler::<S>))
    // Import pipeline
    .route("/import/jobs", post(imports::create::<S>))
    .route("/import/jobs/{id}", get(imports::get_one::<S>))
    .route(
      "/import/jobs/{id}/candidates/{cid}",
      put(imports::update_candidate::<S>),
    )
    .route("/import/jobs/{id}/commit", post(imports::commit::<S>))
    .route("/import/jobs/{id}/discard", post(imports::discard::<S>))
    .with_state(store)
}
