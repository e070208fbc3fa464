//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use lore_core::{
  chunk::{Chunk, ChunkProvenance, DEFAULT_SOURCE_TYPE},
  import::{
    CandidateEdit, CommitReport, Extraction, ImportCandidate, ImportJob,
  },
  item::{Item, ItemDetail, ItemFields},
  link::{Link, NewLink, ResolvedLink},
  search::{SearchQuery, SearchResults},
  store::CatalogStore,
  tag::{ItemTag, TagDraft},
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{
  Error, Result,
  encode::{
    ITEM_COLUMNS, RawChunk, RawItem, encode_dt, encode_item_status, new_id,
    read_item_row,
  },
  error::boxed,
  import, search,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lore catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Connection-level helpers ────────────────────────────────────────────────
//
// These run inside a `Connection::call` closure, either under a dedicated
// per-operation transaction or as part of the single import-commit
// transaction, so they work directly against `rusqlite::Connection`.

/// Resolve or create the chunk for `prov`. On a digest hit the existing
/// chunk's mutable fields are overwritten (last-write-wins) and the existing
/// identifier wins over `candidate_id`.
pub(crate) fn ensure_chunk_in(
  conn: &rusqlite::Connection,
  candidate_id: &str,
  prov: &ChunkProvenance,
  now: &str,
) -> std::result::Result<String, tokio_rusqlite::Error> {
  let thread_id =
    prov.thread_id.clone().unwrap_or_else(|| "manual".to_owned());
  let source_type = prov
    .source_type
    .clone()
    .unwrap_or_else(|| DEFAULT_SOURCE_TYPE.to_owned());
  // Synthetic fallback digest: keeps the unique constraint satisfied but
  // provides no dedup across submissions.
  let digest = prov
    .digest
    .clone()
    .unwrap_or_else(|| format!("digest-{candidate_id}"));
  let locator_json = serde_json::to_string(&prov.locator).map_err(boxed)?;

  let existing: Option<String> = conn
    .query_row(
      "SELECT chunk_id FROM chunks WHERE digest = ?1",
      rusqlite::params![digest],
      |r| r.get(0),
    )
    .optional()?;

  if let Some(chunk_id) = existing {
    conn.execute(
      "UPDATE chunks
       SET thread_id = ?1, source_type = ?2, time_start = ?3, time_end = ?4,
           locator_json = ?5, hint = ?6
       WHERE chunk_id = ?7",
      rusqlite::params![
        thread_id,
        source_type,
        prov.time_start,
        prov.time_end,
        locator_json,
        prov.hint,
        chunk_id,
      ],
    )?;
    Ok(chunk_id)
  } else {
    conn.execute(
      "INSERT INTO chunks (
         chunk_id, thread_id, source_type, time_start, time_end,
         digest, locator_json, hint, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rusqlite::params![
        candidate_id,
        thread_id,
        source_type,
        prov.time_start,
        prov.time_end,
        digest,
        locator_json,
        prov.hint,
        now,
      ],
    )?;
    Ok(candidate_id.to_owned())
  }
}

pub(crate) fn insert_item_in(
  conn: &rusqlite::Connection,
  item: &Item,
) -> std::result::Result<(), tokio_rusqlite::Error> {
  conn.execute(
    "INSERT INTO items (
       item_id, chunk_id, kind, schema_id, stable_key, title, body, domain,
       confidence, status, evidence_basis, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    rusqlite::params![
      item.item_id,
      item.chunk_id,
      item.kind,
      item.schema_id,
      item.stable_key,
      item.title,
      item.body,
      item.domain,
      item.confidence,
      encode_item_status(item.status),
      item.evidence_basis,
      encode_dt(item.created_at),
      encode_dt(item.updated_at),
    ],
  )?;
  Ok(())
}

/// Full-field replace. `chunk_id` uses COALESCE semantics — only updated
/// when a non-null replacement is supplied.
pub(crate) fn update_item_in(
  conn: &rusqlite::Connection,
  item_id: &str,
  fields: &ItemFields,
  chunk_id: Option<&str>,
  now: &str,
) -> std::result::Result<(), tokio_rusqlite::Error> {
  conn.execute(
    "UPDATE items
     SET kind = ?1, schema_id = ?2, stable_key = ?3, title = ?4, body = ?5,
         domain = ?6, confidence = ?7, status = ?8, evidence_basis = ?9,
         updated_at = ?10, chunk_id = COALESCE(?11, chunk_id)
     WHERE item_id = ?12",
    rusqlite::params![
      fields.kind,
      fields.schema_id,
      fields.stable_key,
      fields.title,
      fields.body,
      fields.domain,
      fields.confidence,
      encode_item_status(fields.status),
      fields.evidence_basis,
      now,
      chunk_id,
      item_id,
    ],
  )?;
  Ok(())
}

/// Most-recently-updated item with this stable key, optionally kind-scoped.
pub(crate) fn find_by_stable_key_in(
  conn: &rusqlite::Connection,
  stable_key: &str,
  kind: Option<&str>,
) -> std::result::Result<Option<RawItem>, tokio_rusqlite::Error> {
  let raw = if let Some(kind) = kind {
    conn
      .query_row(
        &format!(
          "SELECT {ITEM_COLUMNS} FROM items
           WHERE stable_key = ?1 AND kind = ?2
           ORDER BY updated_at DESC LIMIT 1"
        ),
        rusqlite::params![stable_key, kind],
        read_item_row,
      )
      .optional()?
  } else {
    conn
      .query_row(
        &format!(
          "SELECT {ITEM_COLUMNS} FROM items
           WHERE stable_key = ?1
           ORDER BY updated_at DESC LIMIT 1"
        ),
        rusqlite::params![stable_key],
        read_item_row,
      )
      .optional()?
  };
  Ok(raw)
}

/// Replace the item's payload wholesale. A JSON null collapses to `{}`.
pub(crate) fn set_payload_in(
  conn: &rusqlite::Connection,
  item_id: &str,
  payload: &Value,
) -> std::result::Result<(), tokio_rusqlite::Error> {
  let payload_json = if payload.is_null() {
    "{}".to_owned()
  } else {
    serde_json::to_string(payload).map_err(boxed)?
  };
  conn.execute(
    "INSERT OR REPLACE INTO item_payloads (item_id, payload_json)
     VALUES (?1, ?2)",
    rusqlite::params![item_id, payload_json],
  )?;
  Ok(())
}

/// Clear-then-insert the item's tag set, creating tags as needed.
pub(crate) fn replace_tags_in(
  conn: &rusqlite::Connection,
  item_id: &str,
  tags: &[TagDraft],
) -> std::result::Result<(), tokio_rusqlite::Error> {
  conn.execute(
    "DELETE FROM item_tags WHERE item_id = ?1",
    rusqlite::params![item_id],
  )?;

  for tag in tags {
    let path = tag.path.clone().unwrap_or_default();
    let tag_id: Option<i64> = conn
      .query_row(
        "SELECT tag_id FROM tags WHERE name = ?1 AND path = ?2",
        rusqlite::params![tag.name, path],
        |r| r.get(0),
      )
      .optional()?;
    let tag_id = match tag_id {
      Some(id) => id,
      None => {
        conn.execute(
          "INSERT INTO tags (name, path) VALUES (?1, ?2)",
          rusqlite::params![tag.name, path],
        )?;
        conn.last_insert_rowid()
      }
    };
    conn.execute(
      "INSERT OR REPLACE INTO item_tags (item_id, tag_id, confidence)
       VALUES (?1, ?2, ?3)",
      rusqlite::params![item_id, tag_id, tag.confidence],
    )?;
  }
  Ok(())
}

pub(crate) fn insert_link_in(
  conn: &rusqlite::Connection,
  link: &Link,
) -> std::result::Result<(), tokio_rusqlite::Error> {
  conn.execute(
    "INSERT INTO item_links (
       link_id, item_id, rel, target_key, note, confidence, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      link.link_id,
      link.item_id,
      link.rel,
      link.target_key,
      link.note,
      link.confidence,
      encode_dt(link.created_at),
    ],
  )?;
  Ok(())
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Health ────────────────────────────────────────────────────────────

  async fn health_check(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Chunks ────────────────────────────────────────────────────────────

  async fn ensure_chunk(
    &self,
    candidate_chunk_id: Option<String>,
    provenance: ChunkProvenance,
  ) -> Result<String> {
    let candidate_id = candidate_chunk_id
      .or_else(|| provenance.chunk_id.clone())
      .unwrap_or_else(|| new_id("chunk"));
    let now = encode_dt(Utc::now());

    let chunk_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let id = ensure_chunk_in(&tx, &candidate_id, &provenance, &now)?;
        tx.commit()?;
        Ok(id)
      })
      .await?;
    Ok(chunk_id)
  }

  async fn get_chunk(&self, chunk_id: String) -> Result<Option<Chunk>> {
    let raw: Option<RawChunk> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT chunk_id, thread_id, source_type, time_start, time_end,
                      digest, locator_json, hint, created_at
               FROM chunks WHERE chunk_id = ?1",
              rusqlite::params![chunk_id],
              |row| {
                Ok(RawChunk {
                  chunk_id:     row.get(0)?,
                  thread_id:    row.get(1)?,
                  source_type:  row.get(2)?,
                  time_start:   row.get(3)?,
                  time_end:     row.get(4)?,
                  digest:       row.get(5)?,
                  locator_json: row.get(6)?,
                  hint:         row.get(7)?,
                  created_at:   row.get(8)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawChunk::into_chunk).transpose()
  }

  // ── Items ─────────────────────────────────────────────────────────────

  async fn create_item(
    &self,
    chunk_id: String,
    fields: ItemFields,
  ) -> Result<Item> {
    let now = Utc::now();
    let item = Item {
      item_id: new_id("item"),
      chunk_id,
      kind: fields.kind,
      schema_id: fields.schema_id,
      stable_key: fields.stable_key,
      title: fields.title,
      body: fields.body,
      domain: fields.domain,
      confidence: fields.confidence,
      status: fields.status,
      evidence_basis: fields.evidence_basis,
      created_at: now,
      updated_at: now,
    };

    let stored = item.clone();
    self
      .conn
      .call(move |conn| {
        insert_item_in(conn, &stored)?;
        Ok(())
      })
      .await?;
    Ok(item)
  }

  async fn get_item(&self, item_id: String) -> Result<Option<ItemDetail>> {
    let found: Option<(RawItem, Option<String>, Vec<ItemTag>)> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
            rusqlite::params![item_id],
            read_item_row,
          )
          .optional()?;

        let Some(raw) = raw else { return Ok(None) };

        let payload_json: Option<String> = conn
          .query_row(
            "SELECT payload_json FROM item_payloads WHERE item_id = ?1",
            rusqlite::params![item_id],
            |r| r.get(0),
          )
          .optional()?;

        let mut stmt = conn.prepare(
          "SELECT t.name, t.path, it.confidence
           FROM item_tags it
           JOIN tags t ON t.tag_id = it.tag_id
           WHERE it.item_id = ?1
           ORDER BY t.name",
        )?;
        let tags = stmt
          .query_map(rusqlite::params![item_id], |row| {
            Ok(ItemTag {
              name:       row.get(0)?,
              path:       row.get(1)?,
              confidence: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((raw, payload_json, tags)))
      })
      .await?;

    let Some((raw, payload_json, tags)) = found else {
      return Ok(None);
    };
    let payload = match payload_json {
      Some(json) => serde_json::from_str(&json)?,
      None => Value::Object(serde_json::Map::new()),
    };
    Ok(Some(ItemDetail { item: raw.into_item()?, payload, tags }))
  }

  async fn update_item(
    &self,
    item_id: String,
    fields: ItemFields,
    chunk_id: Option<String>,
  ) -> Result<()> {
    let now = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        update_item_in(conn, &item_id, &fields, chunk_id.as_deref(), &now)
      })
      .await?;
    Ok(())
  }

  async fn find_item_by_stable_key(
    &self,
    stable_key: String,
    kind: Option<String>,
  ) -> Result<Option<Item>> {
    let raw = self
      .conn
      .call(move |conn| {
        find_by_stable_key_in(conn, &stable_key, kind.as_deref())
      })
      .await?;
    raw.map(RawItem::into_item).transpose()
  }

  async fn soft_delete_item(&self, item_id: String) -> Result<()> {
    let now = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE items SET status = 'deleted', updated_at = ?1
           WHERE item_id = ?2",
          rusqlite::params![now, item_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_payload(&self, item_id: String, payload: Value) -> Result<()> {
    self
      .conn
      .call(move |conn| set_payload_in(conn, &item_id, &payload))
      .await?;
    Ok(())
  }

  async fn replace_item_tags(
    &self,
    item_id: String,
    tags: Vec<TagDraft>,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        replace_tags_in(&tx, &item_id, &tags)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Links ─────────────────────────────────────────────────────────────

  async fn create_link(&self, input: NewLink) -> Result<Link> {
    let link = Link {
      link_id:    new_id("link"),
      item_id:    input.item_id,
      rel:        input.rel,
      target_key: input.target_key,
      note:       input.note,
      confidence: input.confidence,
      created_at: Utc::now(),
    };

    let stored = link.clone();
    self
      .conn
      .call(move |conn| insert_link_in(conn, &stored))
      .await?;
    Ok(link)
  }

  async fn list_links(
    &self,
    item_id: String,
    resolve_targets: bool,
  ) -> Result<Vec<ResolvedLink>> {
    let raws = self
      .conn
      .call(move |conn| {
        let sql = if resolve_targets {
          "SELECT l.link_id, l.item_id, l.rel, l.target_key, l.note,
                  l.confidence, l.created_at, t.title, t.kind
           FROM item_links l
           LEFT JOIN items t ON t.item_id = l.target_key
           WHERE l.item_id = ?1
           ORDER BY l.created_at"
        } else {
          "SELECT l.link_id, l.item_id, l.rel, l.target_key, l.note,
                  l.confidence, l.created_at, NULL, NULL
           FROM item_links l
           WHERE l.item_id = ?1
           ORDER BY l.created_at"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![item_id], |row| {
            Ok(crate::encode::RawLink {
              link_id:      row.get(0)?,
              item_id:      row.get(1)?,
              rel:          row.get(2)?,
              target_key:   row.get(3)?,
              note:         row.get(4)?,
              confidence:   row.get(5)?,
              created_at:   row.get(6)?,
              target_title: row.get(7)?,
              target_kind:  row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(crate::encode::RawLink::into_resolved)
      .collect()
  }

  async fn delete_link(&self, link_id: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM item_links WHERE link_id = ?1",
          rusqlite::params![link_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Suggestions ───────────────────────────────────────────────────────

  async fn suggest_tags(
    &self,
    prefix: String,
    limit: usize,
  ) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT name FROM tags WHERE name LIKE ?1 || '%'
           ORDER BY name LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![prefix, limit as i64], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  async fn suggest_domains(
    &self,
    prefix: String,
    limit: usize,
  ) -> Result<Vec<String>> {
    search::suggest_domains(self, prefix, limit).await
  }

  // ── Search ────────────────────────────────────────────────────────────

  async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
    search::search(self, query.clone()).await
  }

  // ── Import pipeline ───────────────────────────────────────────────────

  async fn create_import_job(
    &self,
    extraction: Extraction,
  ) -> Result<ImportJob> {
    import::create_job(self, extraction).await
  }

  async fn get_import_job(&self, job_id: String) -> Result<Option<ImportJob>> {
    import::get_job(self, job_id).await
  }

  async fn list_candidates(
    &self,
    job_id: String,
  ) -> Result<Vec<ImportCandidate>> {
    import::list_candidates(self, job_id).await
  }

  async fn get_candidate(
    &self,
    candidate_id: String,
  ) -> Result<Option<ImportCandidate>> {
    import::get_candidate(self, candidate_id).await
  }

  async fn update_candidate(
    &self,
    candidate_id: String,
    edit: CandidateEdit,
  ) -> Result<()> {
    import::update_candidate(self, candidate_id, edit).await
  }

  async fn commit_import_job(&self, job_id: String) -> Result<CommitReport> {
    import::commit(self, job_id).await
  }

  async fn discard_import_job(&self, job_id: String) -> Result<()> {
    import::discard(self, job_id).await
  }
}
