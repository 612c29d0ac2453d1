//! SQL schema for the word-way SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Spellings and target codes carry UNIQUE constraints so the scraper's
/// fetch-or-create writes can use `ON CONFLICT DO NOTHING` instead of a
/// racy existence check. Row order (`rowid`) is creation order and is the
/// tie-break for search results.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS pronunciations (
    pronunciation_id TEXT PRIMARY KEY,
    spelling         TEXT NOT NULL UNIQUE,
    created_at       TEXT NOT NULL,   -- RFC 3339 UTC
    scraped_at       TEXT             -- RFC 3339 UTC or NULL
);

-- Words are append-only; a word never moves to another pronunciation.
CREATE TABLE IF NOT EXISTS words (
    word_id          TEXT PRIMARY KEY,
    pronunciation_id TEXT NOT NULL REFERENCES pronunciations(pronunciation_id),
    target_code      INTEGER NOT NULL UNIQUE,
    part             TEXT NOT NULL,   -- snake_case WordPart
    contents         TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

-- criteria (pronunciation) lists related (pronunciation) as a synonym.
CREATE TABLE IF NOT EXISTS synonyms_word_relations (
    criteria_id TEXT NOT NULL REFERENCES pronunciations(pronunciation_id),
    related_id  TEXT NOT NULL REFERENCES pronunciations(pronunciation_id),
    created_at  TEXT NOT NULL,
    UNIQUE (criteria_id, related_id)
);

-- criteria (word) definition refers to relation (pronunciation).
CREATE TABLE IF NOT EXISTS include_word_relations (
    criteria_id TEXT NOT NULL REFERENCES words(word_id),
    relation_id TEXT NOT NULL REFERENCES pronunciations(pronunciation_id),
    created_at  TEXT NOT NULL,
    UNIQUE (criteria_id, relation_id)
);

CREATE TABLE IF NOT EXISTS sentences (
    sentence_id TEXT PRIMARY KEY,
    sentence    TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS word_sentence_assocs (
    word_id     TEXT NOT NULL REFERENCES words(word_id),
    sentence_id TEXT NOT NULL REFERENCES sentences(sentence_id),
    UNIQUE (word_id, sentence_id)
);

CREATE INDEX IF NOT EXISTS words_pronunciation_idx ON words(pronunciation_id);
CREATE INDEX IF NOT EXISTS synonyms_related_idx    ON synonyms_word_relations(related_id);
CREATE INDEX IF NOT EXISTS include_relation_idx    ON include_word_relations(relation_id);

PRAGMA user_version = 1;
";
