//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Structured fields (chunk
//! locators, item payloads, candidate bodies) are stored as compact JSON.
//! Identifiers are prefixed UUID strings, e.g. `item-6e2c...`.

use chrono::{DateTime, Utc};
use lore_core::{
  chunk::Chunk,
  import::{ImportCandidate, ImportJob, JobStatus},
  item::{Item, ItemStatus},
  link::{Link, ResolvedLink},
  search::SearchHit,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

pub fn new_id(prefix: &str) -> String {
  format!("{prefix}-{}", Uuid::new_v4().hyphenated())
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Status enums ────────────────────────────────────────────────────────────

pub fn encode_item_status(s: ItemStatus) -> &'static str {
  match s {
    ItemStatus::Active => "active",
    ItemStatus::Deleted => "deleted",
  }
}

pub fn decode_item_status(s: &str) -> Result<ItemStatus> {
  match s {
    "active" => Ok(ItemStatus::Active),
    "deleted" => Ok(ItemStatus::Deleted),
    other => Err(Error::Decode(format!("unknown item status: {other:?}"))),
  }
}

pub fn encode_job_status(s: JobStatus) -> &'static str {
  match s {
    JobStatus::Pending => "pending",
    JobStatus::Committed => "committed",
    JobStatus::Discarded => "discarded",
  }
}

pub fn decode_job_status(s: &str) -> Result<JobStatus> {
  match s {
    "pending" => Ok(JobStatus::Pending),
    "committed" => Ok(JobStatus::Committed),
    "discarded" => Ok(JobStatus::Discarded),
    other => Err(Error::Decode(format!("unknown job status: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `chunks` row.
pub struct RawChunk {
  pub chunk_id:     String,
  pub thread_id:    String,
  pub source_type:  String,
  pub time_start:   Option<String>,
  pub time_end:     Option<String>,
  pub digest:       String,
  pub locator_json: String,
  pub hint:         Option<String>,
  pub created_at:   String,
}

impl RawChunk {
  pub fn into_chunk(self) -> Result<Chunk> {
    Ok(Chunk {
      chunk_id:    self.chunk_id,
      thread_id:   self.thread_id,
      source_type: self.source_type,
      time_start:  self.time_start,
      time_end:    self.time_end,
      digest:      self.digest,
      locator:     serde_json::from_str(&self.locator_json)?,
      hint:        self.hint,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub item_id:        String,
  pub chunk_id:       String,
  pub kind:           String,
  pub schema_id:      String,
  pub stable_key:     Option<String>,
  pub title:          String,
  pub body:           String,
  pub domain:         Option<String>,
  pub confidence:     f64,
  pub status:         String,
  pub evidence_basis: Option<String>,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      item_id:        self.item_id,
      chunk_id:       self.chunk_id,
      kind:           self.kind,
      schema_id:      self.schema_id,
      stable_key:     self.stable_key,
      title:          self.title,
      body:           self.body,
      domain:         self.domain,
      confidence:     self.confidence,
      status:         decode_item_status(&self.status)?,
      evidence_basis: self.evidence_basis,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}

/// The `SELECT` column list matching [`RawItem`]'s field order.
pub const ITEM_COLUMNS: &str = "item_id, chunk_id, kind, schema_id, \
   stable_key, title, body, domain, confidence, status, evidence_basis, \
   created_at, updated_at";

pub fn read_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
  Ok(RawItem {
    item_id:        row.get(0)?,
    chunk_id:       row.get(1)?,
    kind:           row.get(2)?,
    schema_id:      row.get(3)?,
    stable_key:     row.get(4)?,
    title:          row.get(5)?,
    body:           row.get(6)?,
    domain:         row.get(7)?,
    confidence:     row.get(8)?,
    status:         row.get(9)?,
    evidence_basis: row.get(10)?,
    created_at:     row.get(11)?,
    updated_at:     row.get(12)?,
  })
}

/// Raw strings read directly from an `import_jobs` row.
pub struct RawJob {
  pub job_id:      String,
  pub source_type: String,
  pub thread_id:   Option<String>,
  pub chunk_id:    Option<String>,
  pub digest:      Option<String>,
  pub hint:        Option<String>,
  pub source_json: String,
  pub status:      String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawJob {
  pub fn into_job(self) -> Result<ImportJob> {
    Ok(ImportJob {
      job_id:      self.job_id,
      source_type: self.source_type,
      thread_id:   self.thread_id,
      chunk_id:    self.chunk_id,
      digest:      self.digest,
      hint:        self.hint,
      source:      serde_json::from_str(&self.source_json)?,
      status:      decode_job_status(&self.status)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const JOB_COLUMNS: &str = "job_id, source_type, thread_id, chunk_id, \
   digest, hint, source_json, status, created_at, updated_at";

pub fn read_job_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawJob> {
  Ok(RawJob {
    job_id:      row.get(0)?,
    source_type: row.get(1)?,
    thread_id:   row.get(2)?,
    chunk_id:    row.get(3)?,
    digest:      row.get(4)?,
    hint:        row.get(5)?,
    source_json: row.get(6)?,
    status:      row.get(7)?,
    created_at:  row.get(8)?,
    updated_at:  row.get(9)?,
  })
}

/// Raw strings read directly from an `import_candidates` row.
pub struct RawCandidate {
  pub candidate_id: String,
  pub job_id:       String,
  pub temp_item_id: String,
  pub decision:     String,
  pub skip_type:    String,
  pub reason:       Option<String>,
  pub item_json:    String,
}

impl RawCandidate {
  pub fn into_candidate(self) -> Result<ImportCandidate> {
    Ok(ImportCandidate {
      candidate_id: self.candidate_id,
      job_id:       self.job_id,
      temp_item_id: self.temp_item_id,
      decision:     self.decision,
      skip_type:    self.skip_type,
      reason:       self.reason,
      item:         serde_json::from_str(&self.item_json)?,
    })
  }
}

/// Raw strings from an `item_links` row, plus the optional target join.
pub struct RawLink {
  pub link_id:      String,
  pub item_id:      String,
  pub rel:          String,
  pub target_key:   String,
  pub note:         Option<String>,
  pub confidence:   f64,
  pub created_at:   String,
  pub target_title: Option<String>,
  pub target_kind:  Option<String>,
}

impl RawLink {
  pub fn into_resolved(self) -> Result<ResolvedLink> {
    Ok(ResolvedLink {
      link:         Link {
        link_id:    self.link_id,
        item_id:    self.item_id,
        rel:        self.rel,
        target_key: self.target_key,
        note:       self.note,
        confidence: self.confidence,
        created_at: decode_dt(&self.created_at)?,
      },
      target_title: self.target_title,
      target_kind:  self.target_kind,
    })
  }
}

/// Raw strings from a search result row.
pub struct RawSearchHit {
  pub item_id:    String,
  pub kind:       String,
  pub schema_id:  String,
  pub title:      String,
  pub body:       String,
  pub domain:     Option<String>,
  pub confidence: f64,
  pub created_at: String,
  pub updated_at: String,
  pub tags_json:  Option<String>,
}

impl RawSearchHit {
  pub fn into_hit(self) -> Result<SearchHit> {
    // json_group_array over zero rows yields NULL through the subquery;
    // normalise to an empty list.
    let tags = match self.tags_json.as_deref() {
      None | Some("") => Vec::new(),
      Some(json) => serde_json::from_str(json).unwrap_or_default(),
    };
    Ok(SearchHit {
      item_id:    self.item_id,
      kind:       self.kind,
      schema_id:  self.schema_id,
      title:      self.title,
      body:       self.body,
      domain:     self.domain,
      confidence: self.confidence,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      tags,
    })
  }
}
