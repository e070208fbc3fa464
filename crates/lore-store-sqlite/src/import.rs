//! Import job staging, review edits, and the commit state machine.
//!
//! Commit is the one operation that spans a whole logical transaction: the
//! digest guard, every candidate materialisation, and every link insertion
//! either all land or none do, and only then does the job leave `pending`.

use std::collections::HashMap;

use chrono::Utc;
use lore_core::{
  chunk::{ChunkProvenance, DEFAULT_SOURCE_TYPE},
  import::{
    CandidateEdit, CandidateItem, CommitReport, DECISION_KEEP, Extraction,
    ImportCandidate, ImportJob, JobStatus, SKIP_TYPE_NONE,
  },
  item::{ItemFields, ItemStatus},
  link::Link,
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{
  Error, Result,
  encode::{JOB_COLUMNS, RawCandidate, RawJob, encode_dt, new_id, read_job_row},
  error::boxed,
  store::{
    SqliteStore, ensure_chunk_in, find_by_stable_key_in, insert_item_in,
    insert_link_in, replace_tags_in, set_payload_in, update_item_in,
  },
};

// ─── Staging ─────────────────────────────────────────────────────────────────

/// Stage a new pending job plus one candidate row per extraction item.
/// Job and candidates land atomically.
pub(crate) async fn create_job(
  store: &SqliteStore,
  extraction: Extraction,
) -> Result<ImportJob> {
  let now = Utc::now();
  let source_value = serde_json::to_value(&extraction.source)?;
  let job = ImportJob {
    job_id:      new_id("job"),
    source_type: extraction
      .source
      .source_type
      .clone()
      .unwrap_or_else(|| DEFAULT_SOURCE_TYPE.to_owned()),
    thread_id:   extraction.source.thread_id.clone(),
    chunk_id:    extraction.source.chunk_id.clone(),
    digest:      extraction.source.digest.clone(),
    hint:        extraction.source.hint.clone(),
    source:      source_value,
    status:      JobStatus::Pending,
    created_at:  now,
    updated_at:  now,
  };

  let stored = job.clone();
  let classification = extraction.classification;
  let items = extraction.items;
  stage_job(store, stored, classification, items).await?;
  Ok(job)
}

/// Insert the job row and its candidate rows in one transaction.
async fn stage_job(
  store: &SqliteStore,
  job: ImportJob,
  classification: lore_core::import::Classification,
  items: Vec<Value>,
) -> Result<()> {
  let now_str = encode_dt(job.created_at);
  store
    .conn
    .call(move |conn| {
      let tx = conn.transaction()?;
      let source_json = serde_json::to_string(&job.source).map_err(boxed)?;
      tx.execute(
        "INSERT INTO import_jobs (
           job_id, source_type, thread_id, chunk_id, digest, hint,
           source_json, status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8, ?8)",
        rusqlite::params![
          job.job_id,
          job.source_type,
          job.thread_id,
          job.chunk_id,
          job.digest,
          job.hint,
          source_json,
          now_str,
        ],
      )?;

      for item in &items {
        let temp_item_id = item
          .get("item_id")
          .and_then(Value::as_str)
          .map(str::to_owned)
          .unwrap_or_else(|| new_id("temp"));
        let decision = item
          .get("decision")
          .and_then(Value::as_str)
          .map(str::to_owned)
          .or_else(|| classification.decision.clone())
          .unwrap_or_else(|| DECISION_KEEP.to_owned());
        let skip_type = item
          .get("skip_type")
          .and_then(Value::as_str)
          .map(str::to_owned)
          .or_else(|| classification.skip_type.clone())
          .unwrap_or_else(|| SKIP_TYPE_NONE.to_owned());
        let reason = item
          .get("reason")
          .and_then(Value::as_str)
          .map(str::to_owned)
          .or_else(|| classification.reason.clone());
        let item_json = serde_json::to_string(item).map_err(boxed)?;

        tx.execute(
          "INSERT INTO import_candidates (
             candidate_id, job_id, temp_item_id, decision, skip_type,
             reason, item_json, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            new_id("cand"),
            job.job_id,
            temp_item_id,
            decision,
            skip_type,
            reason,
            item_json,
            now_str,
          ],
        )?;
      }

      tx.commit()?;
      Ok(())
    })
    .await?;
  Ok(())
}

// ─── Reads ───────────────────────────────────────────────────────────────────

pub(crate) async fn get_job(
  store: &SqliteStore,
  job_id: String,
) -> Result<Option<ImportJob>> {
  let raw: Option<RawJob> = store
    .conn
    .call(move |conn| {
      Ok(
        conn
          .query_row(
            &format!(
              "SELECT {JOB_COLUMNS} FROM import_jobs WHERE job_id = ?1"
            ),
            rusqlite::params![job_id],
            read_job_row,
          )
          .optional()?,
      )
    })
    .await?;
  raw.map(RawJob::into_job).transpose()
}

pub(crate) async fn list_candidates(
  store: &SqliteStore,
  job_id: String,
) -> Result<Vec<ImportCandidate>> {
  let raws = store
    .conn
    .call(move |conn| read_candidates(conn, &job_id))
    .await?;
  raws.into_iter().map(RawCandidate::into_candidate).collect()
}

/// Candidates of a job in staging order (rowid).
fn read_candidates(
  conn: &rusqlite::Connection,
  job_id: &str,
) -> std::result::Result<Vec<RawCandidate>, tokio_rusqlite::Error> {
  let mut stmt = conn.prepare(
    "SELECT candidate_id, job_id, temp_item_id, decision, skip_type,
            reason, item_json
     FROM import_candidates WHERE job_id = ?1
     ORDER BY rowid",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![job_id], read_candidate_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn read_candidate_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawCandidate> {
  Ok(RawCandidate {
    candidate_id: row.get(0)?,
    job_id:       row.get(1)?,
    temp_item_id: row.get(2)?,
    decision:     row.get(3)?,
    skip_type:    row.get(4)?,
    reason:       row.get(5)?,
    item_json:    row.get(6)?,
  })
}

pub(crate) async fn get_candidate(
  store: &SqliteStore,
  candidate_id: String,
) -> Result<Option<ImportCandidate>> {
  let raw: Option<RawCandidate> = store
    .conn
    .call(move |conn| {
      Ok(
        conn
          .query_row(
            "SELECT candidate_id, job_id, temp_item_id, decision, skip_type,
                    reason, item_json
             FROM import_candidates WHERE candidate_id = ?1",
            rusqlite::params![candidate_id],
            read_candidate_row,
          )
          .optional()?,
      )
    })
    .await?;
  raw.map(RawCandidate::into_candidate).transpose()
}

// ─── Review edits ────────────────────────────────────────────────────────────

enum EditOutcome {
  Done,
  Missing,
  Frozen { job_id: String, status: String },
}

/// Apply a review edit. Candidates freeze once their job leaves `pending`.
pub(crate) async fn update_candidate(
  store: &SqliteStore,
  candidate_id: String,
  edit: CandidateEdit,
) -> Result<()> {
  let outcome = store
    .conn
    .call(move |conn| {
      let owner: Option<(String, String)> = conn
        .query_row(
          "SELECT j.job_id, j.status
           FROM import_candidates c
           JOIN import_jobs j ON j.job_id = c.job_id
           WHERE c.candidate_id = ?1",
          rusqlite::params![candidate_id],
          |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

      let Some((job_id, status)) = owner else {
        return Ok(EditOutcome::Missing);
      };
      if status != "pending" {
        return Ok(EditOutcome::Frozen { job_id, status });
      }

      let item_json = edit
        .item
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(boxed)?;
      conn.execute(
        "UPDATE import_candidates
         SET decision = ?1, skip_type = ?2, reason = ?3,
             item_json = COALESCE(?4, item_json)
         WHERE candidate_id = ?5",
        rusqlite::params![
          edit.decision,
          edit.skip_type,
          edit.reason,
          item_json,
          candidate_id,
        ],
      )?;
      Ok(EditOutcome::Done)
    })
    .await?;

  match outcome {
    // Missing candidates are the caller's pre-check responsibility; the
    // write itself is a silent no-op.
    EditOutcome::Done | EditOutcome::Missing => Ok(()),
    EditOutcome::Frozen { job_id, status } => Err(frozen_error(job_id, &status)),
  }
}

fn frozen_error(job_id: String, status: &str) -> Error {
  if status == "discarded" {
    Error::Domain(lore_core::Error::JobDiscarded(job_id))
  } else {
    Error::Domain(lore_core::Error::AlreadyCommitted(job_id))
  }
}

// ─── Commit ──────────────────────────────────────────────────────────────────

enum CommitOutcome {
  Committed(CommitReport),
  JobNotFound,
  AlreadyCommitted,
  Discarded,
  DigestConflict(String),
}

/// Commit a pending job inside a single transaction.
///
/// Two passes over the kept candidates: the first materialises every item
/// (so every temporary identifier has a permanent mapping), the second
/// resolves and inserts links. A single interleaved pass would make forward
/// references to sibling candidates fail depending on array order.
pub(crate) async fn commit(
  store: &SqliteStore,
  job_id: String,
) -> Result<CommitReport> {
  let id = job_id.clone();
  let outcome = store
    .conn
    .call(move |conn| {
      let tx = conn.transaction()?;
      let now_dt = Utc::now();
      let now = encode_dt(now_dt);

      let raw: Option<RawJob> = tx
        .query_row(
          &format!("SELECT {JOB_COLUMNS} FROM import_jobs WHERE job_id = ?1"),
          rusqlite::params![id],
          read_job_row,
        )
        .optional()?;
      let Some(raw) = raw else { return Ok(CommitOutcome::JobNotFound) };
      match raw.status.as_str() {
        "committed" => return Ok(CommitOutcome::AlreadyCommitted),
        "discarded" => return Ok(CommitOutcome::Discarded),
        _ => {}
      }

      // Job-level digest guard: stricter than the chunk-level merge below.
      // It rejects re-committing source that an earlier, different job
      // already ingested. The UNIQUE constraint on chunks.digest backs this
      // check against commits racing on other connections.
      if let Some(digest) = &raw.digest {
        let exists: Option<i64> = tx
          .query_row(
            "SELECT 1 FROM chunks WHERE digest = ?1",
            rusqlite::params![digest],
            |r| r.get(0),
          )
          .optional()?;
        if exists.is_some() {
          return Ok(CommitOutcome::DigestConflict(digest.clone()));
        }
      }

      let provenance: ChunkProvenance =
        serde_json::from_str(&raw.source_json).map_err(boxed)?;

      let candidates = read_candidates(&tx, &id)?;
      let total = candidates.len();
      let kept: Vec<RawCandidate> = candidates
        .into_iter()
        .filter(|c| c.decision == DECISION_KEEP)
        .collect();

      let mut report = CommitReport {
        skipped: total - kept.len(),
        ..CommitReport::default()
      };
      let mut id_map: HashMap<String, String> = HashMap::new();
      let mut materialized: Vec<(String, CandidateItem)> = Vec::new();

      // Pass 1: resolve chunks and materialise items.
      for cand in kept {
        let item: CandidateItem =
          serde_json::from_str(&cand.item_json).map_err(boxed)?;

        let chunk_candidate = raw
          .chunk_id
          .clone()
          .unwrap_or_else(|| new_id("chunk"));
        let chunk_id = ensure_chunk_in(&tx, &chunk_candidate, &provenance, &now)?;

        let fields = ItemFields {
          kind:           item.kind.clone(),
          schema_id:      item.schema_id.clone(),
          stable_key:     item.stable_key.clone(),
          title:          item.title.clone(),
          body:           item.body.clone(),
          domain:         item.domain.clone(),
          confidence:     item.confidence,
          status:         ItemStatus::Active,
          evidence_basis: Some(encode_json_object(&item.evidence)?),
        };

        let existing = match &item.stable_key {
          Some(key) => find_by_stable_key_in(&tx, key, Some(&item.kind))?,
          None => None,
        };

        let item_id = match existing {
          Some(found) => {
            update_item_in(&tx, &found.item_id, &fields, Some(&chunk_id), &now)?;
            report.updated += 1;
            found.item_id
          }
          None => {
            let item_id = new_id("item");
            insert_item_in(&tx, &lore_core::item::Item {
              item_id: item_id.clone(),
              chunk_id,
              kind: fields.kind.clone(),
              schema_id: fields.schema_id.clone(),
              stable_key: fields.stable_key.clone(),
              title: fields.title.clone(),
              body: fields.body.clone(),
              domain: fields.domain.clone(),
              confidence: fields.confidence,
              status: fields.status,
              evidence_basis: fields.evidence_basis.clone(),
              created_at: now_dt,
              updated_at: now_dt,
            })?;
            report.inserted += 1;
            item_id
          }
        };

        set_payload_in(&tx, &item_id, &item.payload)?;
        replace_tags_in(&tx, &item_id, &item.tags)?;

        let temp = item
          .item_id
          .clone()
          .unwrap_or_else(|| cand.temp_item_id.clone());
        tx.execute(
          "INSERT OR REPLACE INTO import_id_map (job_id, temp_item_id, item_id)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id, temp, item_id],
        )?;
        id_map.insert(temp, item_id.clone());
        materialized.push((item_id, item));
      }

      // Pass 2: resolve targets through the temp-id map and insert links.
      // Keys absent from the map pass through unresolved — they may already
      // be permanent identifiers of pre-existing items.
      for (source_id, item) in &materialized {
        for link in &item.links {
          let Some(target) = link.target() else { continue };
          let target_key = id_map
            .get(target)
            .cloned()
            .unwrap_or_else(|| target.to_owned());
          insert_link_in(&tx, &Link {
            link_id: new_id("link"),
            item_id: source_id.clone(),
            rel: link.rel.clone(),
            target_key,
            note: link.note.clone(),
            confidence: link.confidence,
            created_at: now_dt,
          })?;
          report.links_created += 1;
        }
      }

      tx.execute(
        "UPDATE import_jobs SET status = 'committed', updated_at = ?1
         WHERE job_id = ?2",
        rusqlite::params![now, id],
      )?;

      tx.commit()?;
      Ok(CommitOutcome::Committed(report))
    })
    .await?;

  match outcome {
    CommitOutcome::Committed(report) => Ok(report),
    CommitOutcome::JobNotFound => {
      Err(Error::Domain(lore_core::Error::JobNotFound(job_id)))
    }
    CommitOutcome::AlreadyCommitted => {
      Err(Error::Domain(lore_core::Error::AlreadyCommitted(job_id)))
    }
    CommitOutcome::Discarded => {
      Err(Error::Domain(lore_core::Error::JobDiscarded(job_id)))
    }
    CommitOutcome::DigestConflict(digest) => {
      Err(Error::Domain(lore_core::Error::ChunkAlreadyExists(digest)))
    }
  }
}

/// Serialise an evidence value for the `evidence_basis` column, collapsing
/// JSON null to an empty object.
fn encode_json_object(
  value: &Value,
) -> std::result::Result<String, tokio_rusqlite::Error> {
  if value.is_null() {
    Ok("{}".to_owned())
  } else {
    serde_json::to_string(value).map_err(boxed)
  }
}

// ─── Discard ─────────────────────────────────────────────────────────────────

enum DiscardOutcome {
  Done,
  Missing,
  Committed,
}

/// Mark a pending job `discarded`. Idempotent for already-discarded jobs;
/// rejected for committed ones.
pub(crate) async fn discard(
  store: &SqliteStore,
  job_id: String,
) -> Result<()> {
  let id = job_id.clone();
  let outcome = store
    .conn
    .call(move |conn| {
      let status: Option<String> = conn
        .query_row(
          "SELECT status FROM import_jobs WHERE job_id = ?1",
          rusqlite::params![id],
          |r| r.get(0),
        )
        .optional()?;
      match status.as_deref() {
        None => Ok(DiscardOutcome::Missing),
        Some("committed") => Ok(DiscardOutcome::Committed),
        Some(_) => {
          conn.execute(
            "UPDATE import_jobs SET status = 'discarded', updated_at = ?1
             WHERE job_id = ?2",
            rusqlite::params![encode_dt(Utc::now()), id],
          )?;
          Ok(DiscardOutcome::Done)
        }
      }
    })
    .await?;

  match outcome {
    DiscardOutcome::Done => Ok(()),
    DiscardOutcome::Missing => {
      Err(Error::Domain(lore_core::Error::JobNotFound(job_id)))
    }
    DiscardOutcome::Committed => {
      Err(Error::Domain(lore_core::Error::AlreadyCommitted(job_id)))
    }
  }
}
