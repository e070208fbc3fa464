//! FTS5-backed catalog search and prefix suggestions.

use lore_core::search::{SearchQuery, SearchResults, SearchSort};
use rusqlite::ToSql;

use crate::{
  Result,
  encode::RawSearchHit,
  store::SqliteStore,
};

/// Build an FTS5 MATCH expression from free text. Every token becomes a
/// quoted phrase, so user input can never inject FTS query syntax
/// (`NEAR`, `*`, column filters, unbalanced quotes).
fn build_match_query(text: &str) -> String {
  text
    .split_whitespace()
    .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Structured filter conditions shared by the page and count queries.
/// Returned as ` AND ...` clauses plus their positional parameters.
fn filter_clauses(query: &SearchQuery) -> (String, Vec<Box<dyn ToSql>>) {
  let mut sql = String::new();
  let mut params: Vec<Box<dyn ToSql>> = Vec::new();

  if !query.kinds.is_empty() {
    let marks = vec!["?"; query.kinds.len()].join(", ");
    sql.push_str(&format!(" AND i.kind IN ({marks})"));
    for kind in &query.kinds {
      params.push(Box::new(kind.clone()));
    }
  }

  if let Some(domain) = &query.domain {
    sql.push_str(" AND i.domain = ?");
    params.push(Box::new(domain.clone()));
  }

  // All-of tag semantics: the item must carry every listed tag name.
  if !query.tags.is_empty() {
    let marks = vec!["?"; query.tags.len()].join(", ");
    sql.push_str(&format!(
      " AND i.item_id IN (
         SELECT it.item_id FROM item_tags it
         JOIN tags t ON t.tag_id = it.tag_id
         WHERE t.name IN ({marks})
         GROUP BY it.item_id
         HAVING COUNT(DISTINCT t.name) >= ?)"
    ));
    for tag in &query.tags {
      params.push(Box::new(tag.clone()));
    }
    params.push(Box::new(query.tags.len() as i64));
  }

  (sql, params)
}

const HIT_COLUMNS: &str = "i.item_id, i.kind, i.schema_id, i.title, i.body, \
   i.domain, i.confidence, i.created_at, i.updated_at, \
   (SELECT json_group_array(t.name)
    FROM item_tags it JOIN tags t ON t.tag_id = it.tag_id
    WHERE it.item_id = i.item_id)";

fn read_hit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSearchHit> {
  Ok(RawSearchHit {
    item_id:    row.get(0)?,
    kind:       row.get(1)?,
    schema_id:  row.get(2)?,
    title:      row.get(3)?,
    body:       row.get(4)?,
    domain:     row.get(5)?,
    confidence: row.get(6)?,
    created_at: row.get(7)?,
    updated_at: row.get(8)?,
    tags_json:  row.get(9)?,
  })
}

pub(crate) async fn search(
  store: &SqliteStore,
  query: SearchQuery,
) -> Result<SearchResults> {
  let match_query = query
    .text
    .as_deref()
    .map(build_match_query)
    .filter(|m| !m.is_empty());

  let (raws, total) = store
    .conn
    .call(move |conn| {
      let (from, where_head) = match &match_query {
        Some(_) => (
          "FROM items_fts f JOIN items i ON i.item_id = f.item_id",
          "WHERE f.items_fts MATCH ?",
        ),
        None => ("FROM items i", "WHERE 1=1"),
      };
      let (filter_sql, filter_params) = filter_clauses(&query);

      let order = match (query.sort, &match_query) {
        (SearchSort::Relevance, Some(_)) => "bm25(f.items_fts)",
        (SearchSort::Created, _) => "i.created_at DESC",
        _ => "i.updated_at DESC",
      };

      let page_sql = format!(
        "SELECT {HIT_COLUMNS} {from} {where_head}{filter_sql}
         ORDER BY {order} LIMIT ? OFFSET ?"
      );
      let mut params: Vec<Box<dyn ToSql>> = Vec::new();
      if let Some(m) = &match_query {
        params.push(Box::new(m.clone()));
      }
      params.extend(filter_params);
      params.push(Box::new(query.limit as i64));
      params.push(Box::new(query.offset as i64));

      let mut stmt = conn.prepare(&page_sql)?;
      let raws = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), read_hit_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

      // Full match count, independent of LIMIT/OFFSET. The boxed parameters
      // are rebuilt because they are not cloneable.
      let count_sql =
        format!("SELECT COUNT(*) {from} {where_head}{filter_sql}");
      let mut count_params: Vec<Box<dyn ToSql>> = Vec::new();
      if let Some(m) = &match_query {
        count_params.push(Box::new(m.clone()));
      }
      count_params.extend(filter_clauses(&query).1);
      let total: i64 = conn.query_row(
        &count_sql,
        rusqlite::params_from_iter(count_params.iter()),
        |r| r.get(0),
      )?;

      Ok((raws, total))
    })
    .await?;

  let items = raws
    .into_iter()
    .map(RawSearchHit::into_hit)
    .collect::<Result<Vec<_>>>()?;
  Ok(SearchResults { total: total as usize, items })
}

pub(crate) async fn suggest_domains(
  store: &SqliteStore,
  prefix: String,
  limit: usize,
) -> Result<Vec<String>> {
  let names = store
    .conn
    .call(move |conn| {
      let mut stmt = conn.prepare(
        "SELECT DISTINCT domain FROM items
         WHERE domain IS NOT NULL AND domain LIKE ?1 || '%'
         ORDER BY domain LIMIT ?2",
      )?;
      let rows = stmt
        .query_map(rusqlite::params![prefix, limit as i64], |r| r.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
      Ok(rows)
    })
    .await?;
  Ok(names)
}

#[cfg(test)]
mod tests {
  use super::build_match_query;

  #[test]
  fn match_query_quotes_tokens() {
    assert_eq!(build_match_query("rust sqlite"), "\"rust\" \"sqlite\"");
  }

  #[test]
  fn match_query_escapes_embedded_quotes() {
    assert_eq!(build_match_query("a\"b"), "\"a\"\"b\"");
  }

  #[test]
  fn match_query_neutralises_operators() {
    assert_eq!(build_match_query("NEAR OR"), "\"NEAR\" \"OR\"");
    assert_eq!(build_match_query("  "), "");
  }
}
