//! Source fingerprinting helpers.
//!
//! Thread identifiers and chunk digests are derived from normalised source
//! text so that retried submissions of the same conversation slice hash to
//! the same values.

use sha2::{Digest as _, Sha256};

/// Collapse all runs of whitespace to single spaces and trim.
pub fn normalize_text(value: &str) -> String {
  value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase hex SHA-256 of `text`.
pub fn sha256_hex(text: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(text.as_bytes());
  hex::encode(hasher.finalize())
}

/// One message of the source conversation, reduced to the fields that feed
/// the thread fingerprint.
#[derive(Debug, Clone)]
pub struct SourceMessage {
  pub role:    String,
  pub content: String,
}

/// Derive a stable thread identifier from the first four messages.
pub fn compute_thread_id(messages: &[SourceMessage]) -> String {
  let parts: Vec<String> = messages
    .iter()
    .take(4)
    .map(|m| {
      format!("{}:{}", normalize_text(&m.role), normalize_text(&m.content))
    })
    .collect();
  format!("t:{}", sha256_hex(&parts.join("\n")))
}

/// Derive a chunk digest from a thread identifier and turn range. Returns
/// `None` when the range is fully unbounded — in that case the store falls
/// back to a synthetic per-chunk digest and dedup is not guaranteed.
pub fn compute_digest(
  thread_id: &str,
  start: Option<i64>,
  end: Option<i64>,
) -> Option<String> {
  if start.is_none() && end.is_none() {
    return None;
  }
  let fmt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
  let raw = normalize_text(&format!("{thread_id}|{}|{}", fmt(start), fmt(end)));
  Some(sha256_hex(&raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_collapses_whitespace() {
    assert_eq!(normalize_text("  a \t b\n\nc "), "a b c");
  }

  #[test]
  fn thread_id_ignores_messages_past_the_fourth() {
    let msg = |c: &str| SourceMessage {
      role:    "user".into(),
      content: c.into(),
    };
    let four: Vec<_> = ["a", "b", "c", "d"].iter().map(|c| msg(c)).collect();
    let mut five = four.clone();
    five.push(msg("e"));
    assert_eq!(compute_thread_id(&four), compute_thread_id(&five));
  }

  #[test]
  fn digest_requires_some_range() {
    assert!(compute_digest("t:x", None, None).is_none());
    let d1 = compute_digest("t:x", Some(0), Some(4)).unwrap();
    let d2 = compute_digest("t:x", Some(0), Some(4)).unwrap();
    assert_eq!(d1, d2);
    assert_ne!(d1, compute_digest("t:x", Some(1), Some(4)).unwrap());
  }
}
