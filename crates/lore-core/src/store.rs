//! The `CatalogStore` trait — the storage boundary of the catalog.
//!
//! The trait is implemented by storage backends (e.g. `lore-store-sqlite`).
//! Higher layers (`lore-api`, `lore-server`) depend on this abstraction, not
//! on any concrete backend. Backends are assumed to provide ACID
//! transactions, unique constraints, and a full-text index over item titles
//! and bodies.

use std::future::Future;

use serde_json::Value;

use crate::{
  chunk::{Chunk, ChunkProvenance},
  import::{
    CandidateEdit, CommitReport, Extraction, ImportCandidate, ImportJob,
  },
  item::{Item, ItemDetail, ItemFields},
  link::{Link, NewLink, ResolvedLink},
  search::{SearchQuery, SearchResults},
  tag::TagDraft,
};

/// Abstraction over a Lore catalog backend.
///
/// Every write runs in its own transaction except
/// [`commit_import_job`](CatalogStore::commit_import_job), which spans the
/// digest guard, all candidate materialisations, and all link insertions in
/// a single transaction — partial commit is a correctness violation.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Health ────────────────────────────────────────────────────────────

  /// Trivial round-trip query against the storage engine.
  fn health_check(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Chunks ────────────────────────────────────────────────────────────

  /// Resolve or create the chunk for `provenance`, returning its identifier.
  ///
  /// If a chunk with the derived digest already exists its mutable fields
  /// are updated in place and the *existing* identifier is returned — the
  /// candidate identifier is discarded. The read-then-write runs inside one
  /// transaction to avoid a duplicate-insert race.
  fn ensure_chunk(
    &self,
    candidate_chunk_id: Option<String>,
    provenance: ChunkProvenance,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Fetch a chunk by identifier. Returns `None` if absent.
  fn get_chunk(
    &self,
    chunk_id: String,
  ) -> impl Future<Output = Result<Option<Chunk>, Self::Error>> + Send + '_;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Insert a new permanent item. No stable-key dedup happens at this
  /// layer; that is the import pipeline's responsibility.
  fn create_item(
    &self,
    chunk_id: String,
    fields: ItemFields,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Fetch an item with its payload and tags. Returns `None` if absent.
  fn get_item(
    &self,
    item_id: String,
  ) -> impl Future<Output = Result<Option<ItemDetail>, Self::Error>> + Send + '_;

  /// Full-field replace. `chunk_id` is only updated when a replacement is
  /// supplied; `updated_at` is refreshed. Callers are responsible for
  /// pre-checking existence — updating a missing item is a silent no-op.
  fn update_item(
    &self,
    item_id: String,
    fields: ItemFields,
    chunk_id: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Most-recently-updated item with this stable key, optionally scoped to
  /// a kind. The merge point import uses to decide insert vs. update.
  fn find_item_by_stable_key(
    &self,
    stable_key: String,
    kind: Option<String>,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Flip status to `deleted` and refresh `updated_at`. Does not cascade to
  /// tags, links, or payload.
  fn soft_delete_item(
    &self,
    item_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the item's payload wholesale (insert-or-replace).
  fn set_payload(
    &self,
    item_id: String,
    payload: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Clear-then-insert the item's full tag set.
  fn replace_item_tags(
    &self,
    item_id: String,
    tags: Vec<TagDraft>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Links ─────────────────────────────────────────────────────────────

  /// Append one edge. Duplicate (item, rel, target) edges are permitted.
  fn create_link(
    &self,
    input: NewLink,
  ) -> impl Future<Output = Result<Link, Self::Error>> + Send + '_;

  /// Outbound links for an item. With `resolve_targets`, target item
  /// metadata is left-joined in; dangling targets yield `None` fields.
  fn list_links(
    &self,
    item_id: String,
    resolve_targets: bool,
  ) -> impl Future<Output = Result<Vec<ResolvedLink>, Self::Error>> + Send + '_;

  /// Unconditional delete; removing a non-existent link is a silent no-op.
  fn delete_link(
    &self,
    link_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Suggestions ───────────────────────────────────────────────────────

  /// Tag names starting with `prefix`, in lexical order, capped at `limit`.
  fn suggest_tags(
    &self,
    prefix: String,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Distinct domains starting with `prefix`, in lexical order.
  fn suggest_domains(
    &self,
    prefix: String,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Search ────────────────────────────────────────────────────────────

  /// Full-text + structured search. See [`SearchQuery`] for the filter and
  /// ranking contract.
  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<SearchResults, Self::Error>> + Send + 'a;

  // ── Import pipeline ───────────────────────────────────────────────────

  /// Stage a new pending job and one candidate per extraction item.
  fn create_import_job(
    &self,
    extraction: Extraction,
  ) -> impl Future<Output = Result<ImportJob, Self::Error>> + Send + '_;

  /// Fetch a job. Returns `None` if absent.
  fn get_import_job(
    &self,
    job_id: String,
  ) -> impl Future<Output = Result<Option<ImportJob>, Self::Error>> + Send + '_;

  /// Candidates of a job, in staging order.
  fn list_candidates(
    &self,
    job_id: String,
  ) -> impl Future<Output = Result<Vec<ImportCandidate>, Self::Error>> + Send + '_;

  /// Fetch a single candidate. Returns `None` if absent.
  fn get_candidate(
    &self,
    candidate_id: String,
  ) -> impl Future<Output = Result<Option<ImportCandidate>, Self::Error>> + Send + '_;

  /// Apply a review edit to a candidate. Callers pre-check existence.
  fn update_candidate(
    &self,
    candidate_id: String,
    edit: CandidateEdit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Commit a pending job: digest guard, candidate materialisation with
  /// stable-key upsert, temp-id link resolution, status flip — all in one
  /// transaction. Errors leave the job `pending` with no writes applied.
  fn commit_import_job(
    &self,
    job_id: String,
  ) -> impl Future<Output = Result<CommitReport, Self::Error>> + Send + '_;

  /// Mark a pending job `discarded`.
  fn discard_import_job(
    &self,
    job_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
