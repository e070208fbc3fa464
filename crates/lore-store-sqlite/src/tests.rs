//! Integration tests for `SqliteStore` against an in-memory database.

use lore_core::{
  chunk::ChunkProvenance,
  import::{CandidateEdit, Classification, Extraction},
  item::{ItemFields, ItemStatus},
  link::NewLink,
  search::{SearchQuery, SearchSort},
  store::CatalogStore,
  tag::TagDraft,
};
use serde_json::json;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn note_fields(title: &str) -> ItemFields {
  ItemFields {
    kind: "note".into(),
    schema_id: "knowledge/note.v1".into(),
    title: title.into(),
    body: format!("body of {title}"),
    confidence: 0.8,
    ..ItemFields::default()
  }
}

fn provenance(digest: &str) -> ChunkProvenance {
  ChunkProvenance {
    thread_id: Some("t:abc".into()),
    digest: Some(digest.into()),
    hint: Some("first".into()),
    ..ChunkProvenance::default()
  }
}

async fn seed_item(s: &SqliteStore, title: &str) -> String {
  let chunk_id = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();
  s.create_item(chunk_id, note_fields(title))
    .await
    .unwrap()
    .item_id
}

fn domain_error(e: Error) -> lore_core::Error {
  match e {
    Error::Domain(inner) => inner,
    other => panic!("expected domain error, got {other}"),
  }
}

// ─── Chunks ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_chunk_dedups_on_digest() {
  let s = store().await;

  let first = s.ensure_chunk(None, provenance("d1")).await.unwrap();
  let mut second_prov = provenance("d1");
  second_prov.hint = Some("second".into());
  let second = s.ensure_chunk(None, second_prov).await.unwrap();

  assert_eq!(first, second);
  let chunk = s.get_chunk(first).await.unwrap().unwrap();
  assert_eq!(chunk.digest, "d1");
  // Mutable provenance fields are last-write-wins.
  assert_eq!(chunk.hint.as_deref(), Some("second"));
}

#[tokio::test]
async fn ensure_chunk_without_digest_never_dedups() {
  let s = store().await;

  let a = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();
  let b = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();

  assert_ne!(a, b);
  let chunk = s.get_chunk(a.clone()).await.unwrap().unwrap();
  assert_eq!(chunk.digest, format!("digest-{a}"));
  assert_eq!(chunk.thread_id, "manual");
}

#[tokio::test]
async fn ensure_chunk_respects_caller_supplied_id() {
  let s = store().await;
  let id = s
    .ensure_chunk(Some("chunk-custom".into()), provenance("d2"))
    .await
    .unwrap();
  assert_eq!(id, "chunk-custom");
}

// ─── Items ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_item_with_payload_and_tags() {
  let s = store().await;
  let item_id = seed_item(&s, "alpha").await;

  s.set_payload(item_id.clone(), json!({"steps": ["a", "b"]}))
    .await
    .unwrap();
  s.replace_item_tags(item_id.clone(), vec![
    TagDraft { name: "rust".into(), confidence: 0.9, ..TagDraft::default() },
    TagDraft { name: "db".into(), confidence: 0.5, ..TagDraft::default() },
  ])
  .await
  .unwrap();

  let detail = s.get_item(item_id.clone()).await.unwrap().unwrap();
  assert_eq!(detail.item.title, "alpha");
  assert_eq!(detail.item.status, ItemStatus::Active);
  assert_eq!(detail.payload, json!({"steps": ["a", "b"]}));
  let names: Vec<&str> =
    detail.tags.iter().map(|t| t.name.as_str()).collect();
  assert_eq!(names, vec!["db", "rust"]);
}

#[tokio::test]
async fn get_item_missing_returns_none() {
  let s = store().await;
  assert!(s.get_item("item-missing".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_item_replaces_fields_and_keeps_chunk() {
  let s = store().await;
  let item_id = seed_item(&s, "before").await;
  let original = s.get_item(item_id.clone()).await.unwrap().unwrap();

  let mut fields = note_fields("after");
  fields.domain = Some("eng".into());
  s.update_item(item_id.clone(), fields, None).await.unwrap();

  let updated = s.get_item(item_id).await.unwrap().unwrap();
  assert_eq!(updated.item.title, "after");
  assert_eq!(updated.item.domain.as_deref(), Some("eng"));
  assert_eq!(updated.item.chunk_id, original.item.chunk_id);
}

#[tokio::test]
async fn replace_tags_is_wholesale() {
  let s = store().await;
  let item_id = seed_item(&s, "tagged").await;

  s.replace_item_tags(item_id.clone(), vec![TagDraft {
    name: "old".into(),
    ..TagDraft::default()
  }])
  .await
  .unwrap();
  s.replace_item_tags(item_id.clone(), vec![TagDraft {
    name: "new".into(),
    ..TagDraft::default()
  }])
  .await
  .unwrap();

  let detail = s.get_item(item_id).await.unwrap().unwrap();
  assert_eq!(detail.tags.len(), 1);
  assert_eq!(detail.tags[0].name, "new");
}

#[tokio::test]
async fn find_by_stable_key_scopes_to_kind() {
  let s = store().await;
  let chunk_id = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();

  let mut note = note_fields("note");
  note.stable_key = Some("k1".into());
  let note = s.create_item(chunk_id.clone(), note).await.unwrap();

  let mut howto = note_fields("howto");
  howto.kind = "howto".into();
  howto.stable_key = Some("k1".into());
  let howto = s.create_item(chunk_id, howto).await.unwrap();

  let found = s
    .find_item_by_stable_key("k1".into(), Some("howto".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.item_id, howto.item_id);

  let any = s
    .find_item_by_stable_key("k1".into(), None)
    .await
    .unwrap()
    .unwrap();
  assert!(any.item_id == note.item_id || any.item_id == howto.item_id);

  assert!(
    s.find_item_by_stable_key("absent".into(), None)
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn soft_delete_retains_row() {
  let s = store().await;
  let item_id = seed_item(&s, "gone").await;

  s.soft_delete_item(item_id.clone()).await.unwrap();

  let detail = s.get_item(item_id).await.unwrap().unwrap();
  assert_eq!(detail.item.status, ItemStatus::Deleted);
}

// ─── Links ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn links_resolve_targets_and_tolerate_dangling() {
  let s = store().await;
  let a = seed_item(&s, "source").await;
  let b = seed_item(&s, "target").await;

  s.create_link(NewLink {
    item_id:    a.clone(),
    rel:        "related".into(),
    target_key: b.clone(),
    note:       None,
    confidence: 0.7,
  })
  .await
  .unwrap();
  s.create_link(NewLink {
    item_id:    a.clone(),
    rel:        "related".into(),
    target_key: "item-unknown".into(),
    note:       Some("external".into()),
    confidence: 0.2,
  })
  .await
  .unwrap();

  let links = s.list_links(a.clone(), true).await.unwrap();
  assert_eq!(links.len(), 2);
  let resolved =
    links.iter().find(|l| l.link.target_key == b).unwrap();
  assert_eq!(resolved.target_title.as_deref(), Some("target"));
  assert_eq!(resolved.target_kind.as_deref(), Some("note"));
  let dangling = links
    .iter()
    .find(|l| l.link.target_key == "item-unknown")
    .unwrap();
  assert!(dangling.target_title.is_none());
  assert!(dangling.target_kind.is_none());

  let unresolved = s.list_links(a.clone(), false).await.unwrap();
  assert!(unresolved.iter().all(|l| l.target_title.is_none()));

  s.delete_link(links[0].link.link_id.clone()).await.unwrap();
  assert_eq!(s.list_links(a, true).await.unwrap().len(), 1);
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn suggest_tags_by_prefix() {
  let s = store().await;
  let item_id = seed_item(&s, "tagged").await;
  s.replace_item_tags(item_id, vec![
    TagDraft { name: "alpha".into(), ..TagDraft::default() },
    TagDraft { name: "alphabet".into(), ..TagDraft::default() },
    TagDraft { name: "beta".into(), ..TagDraft::default() },
  ])
  .await
  .unwrap();

  let names = s.suggest_tags("alph".into(), 10).await.unwrap();
  assert_eq!(names, vec!["alpha", "alphabet"]);

  let capped = s.suggest_tags("alph".into(), 1).await.unwrap();
  assert_eq!(capped, vec!["alpha"]);
}

#[tokio::test]
async fn suggest_domains_by_prefix() {
  let s = store().await;
  let chunk_id = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();
  for domain in ["eng", "engineering", "ops"] {
    let mut fields = note_fields(domain);
    fields.domain = Some(domain.into());
    s.create_item(chunk_id.clone(), fields).await.unwrap();
  }

  let names = s.suggest_domains("eng".into(), 10).await.unwrap();
  assert_eq!(names, vec!["eng", "engineering"]);
}

// ─── Search ──────────────────────────────────────────────────────────────────

async fn seed_search_corpus(s: &SqliteStore) {
  let chunk_id = s
    .ensure_chunk(None, ChunkProvenance::default())
    .await
    .unwrap();

  let mut rust_note = note_fields("Rust ownership");
  rust_note.body = "borrowing and lifetimes".into();
  rust_note.domain = Some("eng".into());
  let rust_note = s.create_item(chunk_id.clone(), rust_note).await.unwrap();
  s.replace_item_tags(rust_note.item_id.clone(), vec![
    TagDraft { name: "rust".into(), ..TagDraft::default() },
    TagDraft { name: "memory".into(), ..TagDraft::default() },
  ])
  .await
  .unwrap();

  let mut rust_howto = note_fields("Rust build caching");
  rust_howto.kind = "howto".into();
  rust_howto.body = "incremental compilation".into();
  rust_howto.domain = Some("ops".into());
  let rust_howto = s.create_item(chunk_id.clone(), rust_howto).await.unwrap();
  s.replace_item_tags(rust_howto.item_id, vec![TagDraft {
    name: "rust".into(),
    ..TagDraft::default()
  }])
  .await
  .unwrap();

  let mut python_note = note_fields("Python asyncio");
  python_note.body = "event loop scheduling".into();
  s.create_item(chunk_id, python_note).await.unwrap();
}

#[tokio::test]
async fn search_matches_text() {
  let s = store().await;
  seed_search_corpus(&s).await;

  let results = s
    .search(&SearchQuery {
      text: Some("rust".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(results.total, 2);
  assert_eq!(results.items.len(), 2);
  assert!(results.items.iter().all(|h| h.title.contains("Rust")));
}

#[tokio::test]
async fn search_applies_structured_filters() {
  let s = store().await;
  seed_search_corpus(&s).await;

  let by_kind = s
    .search(&SearchQuery {
      text: Some("rust".into()),
      kinds: vec!["howto".into()],
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(by_kind.total, 1);
  assert_eq!(by_kind.items[0].kind, "howto");

  let by_domain = s
    .search(&SearchQuery {
      text: Some("rust".into()),
      domain: Some("eng".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(by_domain.total, 1);
  assert_eq!(by_domain.items[0].domain.as_deref(), Some("eng"));

  // All-of tag semantics: both tags must be present.
  let by_tags = s
    .search(&SearchQuery {
      text: Some("rust".into()),
      tags: vec!["rust".into(), "memory".into()],
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(by_tags.total, 1);
  assert_eq!(by_tags.items[0].title, "Rust ownership");
  assert_eq!(by_tags.items[0].tags.len(), 2);
}

#[tokio::test]
async fn search_total_ignores_pagination() {
  let s = store().await;
  seed_search_corpus(&s).await;

  let page = s
    .search(&SearchQuery {
      text: Some("rust".into()),
      limit: 1,
      offset: 1,
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn search_without_text_lists_by_recency() {
  let s = store().await;
  seed_search_corpus(&s).await;

  let results = s
    .search(&SearchQuery {
      sort: SearchSort::Created,
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(results.total, 3);
}

#[tokio::test]
async fn search_tolerates_hostile_input() {
  let s = store().await;
  seed_search_corpus(&s).await;

  // Quotes and FTS operators must be neutralised, not executed.
  for q in ["rust\" OR \"python", "NEAR(a b)", "title:*"] {
    let results = s
      .search(&SearchQuery {
        text: Some(q.into()),
        ..SearchQuery::default()
      })
      .await
      .unwrap();
    assert_eq!(results.total, 0, "query {q:?} should match nothing");
  }
}

// ─── Import pipeline ─────────────────────────────────────────────────────────

fn candidate(temp_id: &str, title: &str) -> serde_json::Value {
  json!({
    "item_id": temp_id,
    "kind": "note",
    "schema_id": "knowledge/note.v1",
    "title": title,
    "body": format!("body of {title}"),
    "confidence": 0.8,
  })
}

fn extraction(items: Vec<serde_json::Value>) -> Extraction {
  Extraction {
    source: provenance("import-digest"),
    items,
    classification: Classification::default(),
  }
}

#[tokio::test]
async fn create_job_stages_candidates() {
  let s = store().await;

  let job = s
    .create_import_job(Extraction {
      source: provenance("d-job"),
      items: vec![candidate("tmp-1", "one"), candidate("tmp-2", "two")],
      classification: Classification {
        decision: Some("SKIP".into()),
        skip_type: Some("DUPLICATE".into()),
        reason: Some("seen before".into()),
      },
    })
    .await
    .unwrap();
  assert_eq!(job.digest.as_deref(), Some("d-job"));

  let fetched = s.get_import_job(job.job_id.clone()).await.unwrap().unwrap();
  assert_eq!(
    fetched.status,
    lore_core::import::JobStatus::Pending
  );

  let cands = s.list_candidates(job.job_id).await.unwrap();
  assert_eq!(cands.len(), 2);
  assert_eq!(cands[0].temp_item_id, "tmp-1");
  // Job-level classification backfills candidates that carry none.
  assert!(cands.iter().all(|c| c.decision == "SKIP"));
  assert!(cands.iter().all(|c| c.skip_type == "DUPLICATE"));
  assert_eq!(cands[0].reason.as_deref(), Some("seen before"));
}

#[tokio::test]
async fn commit_materialises_kept_candidates() {
  let s = store().await;

  let mut skip = candidate("tmp-3", "dropped");
  skip["decision"] = json!("SKIP");
  let mut kept = candidate("tmp-1", "kept");
  kept["tags"] = json!([{"name": "imported", "confidence": 0.9}]);
  kept["payload"] = json!({"extra": true});

  let job = s
    .create_import_job(extraction(vec![kept, skip]))
    .await
    .unwrap();
  let report = s.commit_import_job(job.job_id.clone()).await.unwrap();

  assert_eq!(report.inserted, 1);
  assert_eq!(report.updated, 0);
  assert_eq!(report.skipped, 1);

  let found = s
    .search(&SearchQuery {
      text: Some("kept".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(found.total, 1);
  let detail = s
    .get_item(found.items[0].item_id.clone())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(detail.payload, json!({"extra": true}));
  assert_eq!(detail.tags[0].name, "imported");

  let job = s.get_import_job(job.job_id).await.unwrap().unwrap();
  assert_eq!(job.status, lore_core::import::JobStatus::Committed);
}

#[tokio::test]
async fn commit_resolves_temp_ids_including_forward_references() {
  let s = store().await;

  // The first candidate links forward to the second, which is only
  // materialised later in the same commit.
  let mut first = candidate("tmp-a", "first");
  first["links"] =
    json!([{"rel": "related", "target_item_id": "tmp-b"}]);
  let second = candidate("tmp-b", "second");

  let job = s
    .create_import_job(extraction(vec![first, second]))
    .await
    .unwrap();
  let report = s.commit_import_job(job.job_id).await.unwrap();
  assert_eq!(report.inserted, 2);
  assert_eq!(report.links_created, 1);

  let hits = s
    .search(&SearchQuery {
      text: Some("first".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  let links = s
    .list_links(hits.items[0].item_id.clone(), true)
    .await
    .unwrap();
  assert_eq!(links.len(), 1);
  // The temporary target id was remapped to the permanent one.
  assert!(links[0].link.target_key.starts_with("item-"));
  assert_eq!(links[0].target_title.as_deref(), Some("second"));
}

#[tokio::test]
async fn commit_passes_unknown_link_targets_through() {
  let s = store().await;
  let existing = seed_item(&s, "pre-existing").await;

  let mut cand = candidate("tmp-1", "linker");
  cand["links"] = json!([{"rel": "related", "target_key": existing}]);

  let job = s
    .create_import_job(extraction(vec![cand]))
    .await
    .unwrap();
  let report = s.commit_import_job(job.job_id).await.unwrap();
  assert_eq!(report.links_created, 1);

  let hits = s
    .search(&SearchQuery {
      text: Some("linker".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  let links = s
    .list_links(hits.items[0].item_id.clone(), true)
    .await
    .unwrap();
  assert_eq!(links[0].link.target_key, existing);
  assert_eq!(links[0].target_title.as_deref(), Some("pre-existing"));
}

#[tokio::test]
async fn commit_upserts_by_stable_key() {
  let s = store().await;

  let mut original = candidate("tmp-1", "v1");
  original["stable_key"] = json!("sk-1");
  let job = s
    .create_import_job(Extraction {
      source: ChunkProvenance::default(),
      items: vec![original],
      classification: Classification::default(),
    })
    .await
    .unwrap();
  s.commit_import_job(job.job_id).await.unwrap();

  let mut revised = candidate("tmp-1", "v2");
  revised["stable_key"] = json!("sk-1");
  revised["tags"] = json!([{"name": "fresh"}]);
  let job = s
    .create_import_job(Extraction {
      source: ChunkProvenance::default(),
      items: vec![revised],
      classification: Classification::default(),
    })
    .await
    .unwrap();
  let report = s.commit_import_job(job.job_id).await.unwrap();

  assert_eq!(report.inserted, 0);
  assert_eq!(report.updated, 1);

  let found = s
    .find_item_by_stable_key("sk-1".into(), Some("note".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.title, "v2");
  let detail = s.get_item(found.item_id).await.unwrap().unwrap();
  assert_eq!(detail.tags.len(), 1);
  assert_eq!(detail.tags[0].name, "fresh");
}

#[tokio::test]
async fn commit_rejects_already_ingested_digest() {
  let s = store().await;
  s.ensure_chunk(None, provenance("seen")).await.unwrap();

  let job = s
    .create_import_job(Extraction {
      source: provenance("seen"),
      items: vec![candidate("tmp-1", "dup")],
      classification: Classification::default(),
    })
    .await
    .unwrap();

  let err = s.commit_import_job(job.job_id.clone()).await.unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::ChunkAlreadyExists(d) if d == "seen"
  ));

  // Nothing was materialised and the job is still pending.
  let job = s.get_import_job(job.job_id).await.unwrap().unwrap();
  assert_eq!(job.status, lore_core::import::JobStatus::Pending);
  let hits = s
    .search(&SearchQuery {
      text: Some("dup".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(hits.total, 0);
}

#[tokio::test]
async fn commit_is_single_shot() {
  let s = store().await;
  let job = s
    .create_import_job(extraction(vec![candidate("tmp-1", "once")]))
    .await
    .unwrap();

  s.commit_import_job(job.job_id.clone()).await.unwrap();
  let err = s.commit_import_job(job.job_id.clone()).await.unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::AlreadyCommitted(id) if id == job.job_id
  ));

  // No duplicate materialisation from the rejected second attempt.
  let hits = s
    .search(&SearchQuery {
      text: Some("once".into()),
      ..SearchQuery::default()
    })
    .await
    .unwrap();
  assert_eq!(hits.total, 1);
}

#[tokio::test]
async fn commit_missing_job_is_not_found() {
  let s = store().await;
  let err = s.commit_import_job("job-missing".into()).await.unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::JobNotFound(_)
  ));
}

#[tokio::test]
async fn discarded_jobs_cannot_commit() {
  let s = store().await;
  let job = s
    .create_import_job(extraction(vec![candidate("tmp-1", "binned")]))
    .await
    .unwrap();

  s.discard_import_job(job.job_id.clone()).await.unwrap();
  // Discard is idempotent.
  s.discard_import_job(job.job_id.clone()).await.unwrap();

  let err = s.commit_import_job(job.job_id.clone()).await.unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::JobDiscarded(id) if id == job.job_id
  ));
}

#[tokio::test]
async fn discard_rejects_committed_jobs() {
  let s = store().await;
  let job = s
    .create_import_job(extraction(vec![candidate("tmp-1", "done")]))
    .await
    .unwrap();
  s.commit_import_job(job.job_id.clone()).await.unwrap();

  let err = s.discard_import_job(job.job_id).await.unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::AlreadyCommitted(_)
  ));
}

#[tokio::test]
async fn candidate_edits_apply_while_pending() {
  let s = store().await;
  let job = s
    .create_import_job(extraction(vec![candidate("tmp-1", "draft")]))
    .await
    .unwrap();
  let cands = s.list_candidates(job.job_id.clone()).await.unwrap();
  let candidate_id = cands[0].candidate_id.clone();

  s.update_candidate(candidate_id.clone(), CandidateEdit {
    decision:  "SKIP".into(),
    skip_type: "LOW_VALUE".into(),
    reason:    Some("not worth keeping".into()),
    item:      None,
  })
  .await
  .unwrap();

  let edited = s
    .get_candidate(candidate_id.clone())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(edited.decision, "SKIP");
  assert_eq!(edited.skip_type, "LOW_VALUE");
  // A None item keeps the staged payload.
  assert_eq!(edited.item["title"], json!("draft"));

  let report = s.commit_import_job(job.job_id).await.unwrap();
  assert_eq!(report.inserted, 0);
  assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn candidates_freeze_after_commit() {
  let s = store().await;
  let job = s
    .create_import_job(extraction(vec![candidate("tmp-1", "frozen")]))
    .await
    .unwrap();
  let cands = s.list_candidates(job.job_id.clone()).await.unwrap();
  s.commit_import_job(job.job_id).await.unwrap();

  let err = s
    .update_candidate(cands[0].candidate_id.clone(), CandidateEdit {
      decision:  "SKIP".into(),
      skip_type: "NONE".into(),
      reason:    None,
      item:      None,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    domain_error(err),
    lore_core::Error::AlreadyCommitted(_)
  ));
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check_passes_on_open_store() {
  let s = store().await;
  s.health_check().await.unwrap();
}
