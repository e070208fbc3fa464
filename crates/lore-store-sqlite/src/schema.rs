//! SQL schema for the Lore SQLite store.
//!
//! Executed once at connection startup. Idempotent thanks to
//! `CREATE ... IF NOT EXISTS`; future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Provenance records, keyed by content digest. Never deleted.
CREATE TABLE IF NOT EXISTS chunks (
    chunk_id     TEXT PRIMARY KEY,
    thread_id    TEXT NOT NULL,
    source_type  TEXT NOT NULL,
    time_start   TEXT,
    time_end     TEXT,
    digest       TEXT NOT NULL UNIQUE,  -- dedup key; backs the commit guard
    locator_json TEXT NOT NULL,
    hint         TEXT,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS items (
    item_id        TEXT PRIMARY KEY,
    chunk_id       TEXT NOT NULL REFERENCES chunks(chunk_id),
    kind           TEXT NOT NULL,
    schema_id      TEXT NOT NULL,
    stable_key     TEXT,               -- cross-import identity; no UNIQUE:
                                       -- transient duplicates are permitted
    title          TEXT NOT NULL,
    body           TEXT NOT NULL,
    domain         TEXT,
    confidence     REAL NOT NULL DEFAULT 0,
    status         TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'deleted'
    evidence_basis TEXT,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

-- Arbitrary structured data, 1:1 with an item, replaced wholesale.
CREATE TABLE IF NOT EXISTS item_payloads (
    item_id      TEXT PRIMARY KEY REFERENCES items(item_id),
    payload_json TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    tag_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    path      TEXT NOT NULL DEFAULT '',
    parent_id INTEGER,
    UNIQUE (name, path)
);

CREATE TABLE IF NOT EXISTS item_tags (
    item_id    TEXT NOT NULL REFERENCES items(item_id),
    tag_id     INTEGER NOT NULL REFERENCES tags(tag_id),
    confidence REAL NOT NULL DEFAULT 0,
    PRIMARY KEY (item_id, tag_id)
);

-- Directed typed edges. target_key is usually a permanent item id but may
-- be an unresolved external key; no uniqueness on (item, rel, target).
CREATE TABLE IF NOT EXISTS item_links (
    link_id    TEXT PRIMARY KEY,
    item_id    TEXT NOT NULL REFERENCES items(item_id),
    rel        TEXT NOT NULL,
    target_key TEXT NOT NULL,
    note       TEXT,
    confidence REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS import_jobs (
    job_id      TEXT PRIMARY KEY,
    source_type TEXT NOT NULL,
    thread_id   TEXT,
    chunk_id    TEXT,
    digest      TEXT,
    hint        TEXT,
    source_json TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'pending',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS import_candidates (
    candidate_id TEXT PRIMARY KEY,
    job_id       TEXT NOT NULL REFERENCES import_jobs(job_id),
    temp_item_id TEXT NOT NULL,
    decision     TEXT NOT NULL DEFAULT 'KEEP',
    skip_type    TEXT NOT NULL DEFAULT 'NONE',
    reason       TEXT,
    item_json    TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

-- Audit trail of temp -> permanent id resolution, per job.
CREATE TABLE IF NOT EXISTS import_id_map (
    job_id       TEXT NOT NULL REFERENCES import_jobs(job_id),
    temp_item_id TEXT NOT NULL,
    item_id      TEXT NOT NULL,
    PRIMARY KEY (job_id, temp_item_id)
);

-- Full-text index over item titles and bodies, kept in sync by triggers.
CREATE VIRTUAL TABLE IF NOT EXISTS items_fts USING fts5(
    item_id UNINDEXED,
    title,
    body
);

CREATE TRIGGER IF NOT EXISTS items_fts_insert AFTER INSERT ON items BEGIN
    INSERT INTO items_fts (item_id, title, body)
    VALUES (new.item_id, new.title, new.body);
END;

CREATE TRIGGER IF NOT EXISTS items_fts_update AFTER UPDATE ON items BEGIN
    DELETE FROM items_fts WHERE item_id = old.item_id;
    INSERT INTO items_fts (item_id, title, body)
    VALUES (new.item_id, new.title, new.body);
END;

CREATE TRIGGER IF NOT EXISTS items_fts_delete AFTER DELETE ON items BEGIN
    DELETE FROM items_fts WHERE item_id = old.item_id;
END;

CREATE INDEX IF NOT EXISTS items_stable_key_idx ON items(stable_key);
CREATE INDEX IF NOT EXISTS items_kind_idx       ON items(kind);
CREATE INDEX IF NOT EXISTS items_domain_idx     ON items(domain);
CREATE INDEX IF NOT EXISTS item_links_item_idx  ON item_links(item_id);
CREATE INDEX IF NOT EXISTS candidates_job_idx   ON import_candidates(job_id);

PRAGMA user_version = 1;
";
