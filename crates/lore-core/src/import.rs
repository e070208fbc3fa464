//! Import pipeline types — jobs, staged candidates, and the commit report.
//!
//! A job stages extracted candidates for review, then transitions once to
//! `committed` or `discarded`. Candidate decisions and payloads are mutable
//! while the job is pending and frozen afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{chunk::ChunkProvenance, tag::TagDraft};

/// Candidate decision value that marks it for materialisation on commit.
/// Decisions are otherwise free-form skip markers.
pub const DECISION_KEEP: &str = "KEEP";

/// Default skip type for candidates with no classification.
pub const SKIP_TYPE_NONE: &str = "NONE";

// ─── Job ─────────────────────────────────────────────────────────────────────

/// Job lifecycle. `Committed` and `Discarded` are terminal and mutually
/// exclusive; a job leaves `Pending` at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
  #[default]
  Pending,
  Committed,
  Discarded,
}

/// One ingestion attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJob {
  pub job_id:      String,
  pub source_type: String,
  pub thread_id:   Option<String>,
  pub chunk_id:    Option<String>,
  pub digest:      Option<String>,
  pub hint:        Option<String>,
  /// The raw source descriptor as submitted.
  pub source:      serde_json::Value,
  pub status:      JobStatus,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

// ─── Extraction request ──────────────────────────────────────────────────────

/// Job-level classification defaults applied to candidates that carry none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
  #[serde(default)]
  pub decision:  Option<String>,
  #[serde(default)]
  pub skip_type: Option<String>,
  #[serde(default)]
  pub reason:    Option<String>,
}

/// The extraction payload staged as a new import job: a source descriptor
/// plus the proposed items, each kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Extraction {
  #[serde(default)]
  pub source:         ChunkProvenance,
  #[serde(default)]
  pub items:          Vec<serde_json::Value>,
  #[serde(default)]
  pub classification: Classification,
}

// ─── Candidates ──────────────────────────────────────────────────────────────

/// One proposed item staged inside a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCandidate {
  pub candidate_id: String,
  pub job_id:       String,
  /// Job-scoped temporary identifier; not globally unique.
  pub temp_item_id: String,
  pub decision:     String,
  pub skip_type:    String,
  pub reason:       Option<String>,
  /// The full candidate item payload, mutable during review.
  pub item:         serde_json::Value,
}

fn default_decision() -> String { DECISION_KEEP.to_owned() }
fn default_skip_type() -> String { SKIP_TYPE_NONE.to_owned() }

/// Review edit applied to a pending candidate. A `None` item keeps the
/// stored payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateEdit {
  #[serde(default = "default_decision")]
  pub decision:  String,
  #[serde(default = "default_skip_type")]
  pub skip_type: String,
  #[serde(default)]
  pub reason:    Option<String>,
  #[serde(default)]
  pub item:      Option<serde_json::Value>,
}

// ─── Typed candidate payload accessors ──────────────────────────────────────

/// The fields the commit pipeline reads out of a candidate's payload. The
/// payload itself is arbitrary JSON; everything not listed here is carried
/// opaquely in `payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateItem {
  /// Temporary identifier used for intra-job links.
  #[serde(default)]
  pub item_id:    Option<String>,
  pub kind:       String,
  pub schema_id:  String,
  pub title:      String,
  pub body:       String,
  #[serde(default)]
  pub stable_key: Option<String>,
  #[serde(default)]
  pub domain:     Option<String>,
  #[serde(default)]
  pub confidence: f64,
  #[serde(default)]
  pub evidence:   serde_json::Value,
  #[serde(default)]
  pub payload:    serde_json::Value,
  #[serde(default)]
  pub tags:       Vec<TagDraft>,
  #[serde(default)]
  pub links:      Vec<CandidateLink>,
}

/// A link declared on a candidate. The target may be a sibling candidate's
/// temporary identifier or an already-permanent item identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateLink {
  pub rel:            String,
  #[serde(default)]
  pub target_key:     Option<String>,
  #[serde(default)]
  pub target_item_id: Option<String>,
  #[serde(default)]
  pub note:           Option<String>,
  #[serde(default)]
  pub confidence:     f64,
}

impl CandidateLink {
  /// The declared target, preferring `target_key` over `target_item_id`.
  pub fn target(&self) -> Option<&str> {
    self.target_key.as_deref().or(self.target_item_id.as_deref())
  }
}

// ─── Commit report ───────────────────────────────────────────────────────────

/// Counts returned by a successful commit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitReport {
  /// Kept candidates materialised as new items.
  pub inserted:      usize,
  /// Kept candidates merged into existing items by stable key.
  pub updated:       usize,
  /// Candidates whose decision was not `KEEP`.
  pub skipped:       usize,
  pub links_created: usize,
  /// Reserved for partial-failure reporting.
  pub warnings:      Vec<String>,
}
