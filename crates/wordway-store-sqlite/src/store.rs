//! [`SqliteStore`] — the SQLite implementation of [`DictionaryStore`].

use std::path::Path;

use chrono::{DateTime, SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use wordway_core::{
  pronunciation::Pronunciation,
  query::MatchQuery,
  relation::{IncludeWordRelation, SynonymsWordRelation},
  store::{DictionaryStore, MatchSet},
  word::{NewWord, Sentence, Word},
};

use crate::{
  Error, Result,
  encode::{
    PRONUNCIATION_COLUMNS, RawInclusionMatch, RawPronunciation,
    RawPronunciationDetail, RawSentence, RawWord, RawWordDetail, WORD_COLUMNS,
    encode_dt, encode_keywords, encode_part, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A word-way dictionary backed by a single SQLite file.
///
/// The inner connection is reference-counted; clones share it.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
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

/// Current time at the precision stored in the database, so returned values
/// compare equal to what a later read decodes.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

// ─── Read helpers ────────────────────────────────────────────────────────────
//
// These run inside a `Connection::call` closure, usually on a transaction, and
// only produce `Raw*` rows; decoding happens once the closure has returned.

fn query_pronunciations<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  sql: &str,
  params: P,
) -> rusqlite::Result<Vec<RawPronunciation>> {
  let mut stmt = conn.prepare(sql)?;
  stmt
    .query_map(params, |row| RawPronunciation::from_row(row, 0))?
    .collect()
}

fn synonym_spellings(
  conn: &rusqlite::Connection,
  pronunciation_id: &str,
) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare_cached(
    "SELECT p.spelling
     FROM synonyms_word_relations s
     JOIN pronunciations p ON p.pronunciation_id = s.related_id
     WHERE s.criteria_id = ?1
     ORDER BY s.rowid",
  )?;
  stmt
    .query_map(rusqlite::params![pronunciation_id], |row| row.get(0))?
    .collect()
}

fn inclusion_spellings(
  conn: &rusqlite::Connection,
  word_id: &str,
) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare_cached(
    "SELECT p.spelling
     FROM include_word_relations i
     JOIN pronunciations p ON p.pronunciation_id = i.relation_id
     WHERE i.criteria_id = ?1
     ORDER BY i.rowid",
  )?;
  stmt
    .query_map(rusqlite::params![word_id], |row| row.get(0))?
    .collect()
}

fn words_of(
  conn: &rusqlite::Connection,
  pronunciation_id: &str,
) -> rusqlite::Result<Vec<RawWord>> {
  let mut stmt = conn.prepare_cached(&format!(
    "SELECT {WORD_COLUMNS} FROM words w
     WHERE w.pronunciation_id = ?1
     ORDER BY w.target_code"
  ))?;
  stmt
    .query_map(rusqlite::params![pronunciation_id], |row| {
      RawWord::from_row(row, 0)
    })?
    .collect()
}

fn word_detail(
  conn: &rusqlite::Connection,
  word: RawWord,
) -> rusqlite::Result<RawWordDetail> {
  let related_pronunciations = inclusion_spellings(conn, &word.word_id)?;
  Ok(RawWordDetail { word, related_pronunciations })
}

fn pronunciation_detail(
  conn: &rusqlite::Connection,
  pronunciation: RawPronunciation,
) -> rusqlite::Result<RawPronunciationDetail> {
  let words: Vec<_> = words_of(conn, &pronunciation.pronunciation_id)?
    .into_iter()
    .map(|w| word_detail(conn, w))
    .collect::<rusqlite::Result<_>>()?;
  let related_synonyms = synonym_spellings(conn, &pronunciation.pronunciation_id)?;
  Ok(RawPronunciationDetail { pronunciation, words, related_synonyms })
}

/// Raw counterpart of [`MatchSet`].
struct RawMatchSet {
  exact:     Vec<RawPronunciationDetail>,
  synonym:   Vec<RawPronunciationDetail>,
  inclusion: Vec<RawInclusionMatch>,
}

impl RawMatchSet {
  fn into_match_set(self) -> Result<MatchSet> {
    Ok(MatchSet {
      exact:     self
        .exact
        .into_iter()
        .map(RawPronunciationDetail::into_detail)
        .collect::<Result<_>>()?,
      synonym:   self
        .synonym
        .into_iter()
        .map(RawPronunciationDetail::into_detail)
        .collect::<Result<_>>()?,
      inclusion: self
        .inclusion
        .into_iter()
        .map(RawInclusionMatch::into_match)
        .collect::<Result<_>>()?,
    })
  }
}

/// Run the three selection rules against `conn`.
///
/// Keywords are bound once as a JSON array and expanded with `json_each`, so
/// the number of keywords is not limited by SQLite's host parameter cap.
fn read_match_set(
  conn: &rusqlite::Connection,
  keywords: &[String],
) -> rusqlite::Result<RawMatchSet> {
  // Unfiltered listing: every pronunciation, no relation groups.
  if keywords.is_empty() {
    let all = query_pronunciations(
      conn,
      &format!("SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p ORDER BY p.rowid"),
      [],
    )?;
    let exact: Vec<_> = all
      .into_iter()
      .map(|p| pronunciation_detail(conn, p))
      .collect::<rusqlite::Result<_>>()?;
    return Ok(RawMatchSet { exact, synonym: vec![], inclusion: vec![] });
  }

  let keywords_json = encode_keywords(keywords);

  // Priority 0: literal substring match on the spelling.
  let exact = query_pronunciations(
    conn,
    &format!(
      "SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p
       WHERE EXISTS (
         SELECT 1 FROM json_each(?1) k WHERE instr(p.spelling, k.value) > 0
       )
       ORDER BY p.rowid"
    ),
    rusqlite::params![keywords_json],
  )?;

  // Priority 1: synonym edge pointing at an exactly-spelled keyword.
  let synonym = query_pronunciations(
    conn,
    &format!(
      "SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p
       WHERE p.pronunciation_id IN (
         SELECT s.criteria_id
         FROM synonyms_word_relations s
         JOIN pronunciations t ON t.pronunciation_id = s.related_id
         WHERE t.spelling IN (SELECT value FROM json_each(?1))
       )
       ORDER BY p.rowid"
    ),
    rusqlite::params![keywords_json],
  )?;

  // Priority 2: words whose definition includes an exactly-spelled keyword.
  let mut stmt = conn.prepare(&format!(
    "SELECT {WORD_COLUMNS}, {PRONUNCIATION_COLUMNS}
     FROM words w
     JOIN pronunciations p ON p.pronunciation_id = w.pronunciation_id
     WHERE w.word_id IN (
       SELECT i.criteria_id
       FROM include_word_relations i
       JOIN pronunciations t ON t.pronunciation_id = i.relation_id
       WHERE t.spelling IN (SELECT value FROM json_each(?1))
     )
     ORDER BY p.rowid, w.target_code"
  ))?;
  let included: Vec<(RawWord, RawPronunciation)> = stmt
    .query_map(rusqlite::params![keywords_json], |row| {
      Ok((RawWord::from_row(row, 0)?, RawPronunciation::from_row(row, 6)?))
    })?
    .collect::<rusqlite::Result<_>>()?;

  let exact: Vec<_> = exact
    .into_iter()
    .map(|p| pronunciation_detail(conn, p))
    .collect::<rusqlite::Result<_>>()?;
  let synonym: Vec<_> = synonym
    .into_iter()
    .map(|p| pronunciation_detail(conn, p))
    .collect::<rusqlite::Result<_>>()?;
  let inclusion: Vec<_> = included
    .into_iter()
    .map(|(word, owner)| -> rusqlite::Result<RawInclusionMatch> {
      Ok(RawInclusionMatch {
        owner_synonyms: synonym_spellings(conn, &owner.pronunciation_id)?,
        word: word_detail(conn, word)?,
        owner,
      })
    })
    .collect::<rusqlite::Result<_>>()?;

  Ok(RawMatchSet { exact, synonym, inclusion })
}

// ─── DictionaryStore impl ────────────────────────────────────────────────────

impl DictionaryStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_pronunciation(&self, id: Uuid) -> Result<Option<Pronunciation>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPronunciation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p
               WHERE p.pronunciation_id = ?1"
            ),
            rusqlite::params![id_str],
            |row| RawPronunciation::from_row(row, 0),
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPronunciation::into_pronunciation).transpose()
  }

  async fn find_pronunciation<'a>(
    &'a self,
    spelling: &'a str,
  ) -> Result<Option<Pronunciation>> {
    let spelling = spelling.to_owned();

    let raw: Option<RawPronunciation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p
               WHERE p.spelling = ?1"
            ),
            rusqlite::params![spelling],
            |row| RawPronunciation::from_row(row, 0),
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPronunciation::into_pronunciation).transpose()
  }

  async fn list_words(&self, pronunciation_id: Uuid) -> Result<Vec<Word>> {
    let id_str = encode_uuid(pronunciation_id);

    let raws: Vec<RawWord> = self
      .conn
      .call(move |conn| Ok(words_of(conn, &id_str)?))
      .await?;

    raws.into_iter().map(RawWord::into_word).collect()
  }

  async fn list_sentences(&self, word_id: Uuid) -> Result<Vec<Sentence>> {
    let id_str = encode_uuid(word_id);

    let raws: Vec<RawSentence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.sentence_id, s.sentence, s.created_at
           FROM word_sentence_assocs a
           JOIN sentences s ON s.sentence_id = a.sentence_id
           WHERE a.word_id = ?1
           ORDER BY a.rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawSentence::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSentence::into_sentence).collect()
  }

  async fn resolve_matches<'a>(&'a self, query: &'a MatchQuery) -> Result<MatchSet> {
    let keywords = query.keywords().to_vec();

    // One read transaction so the three groups see the same snapshot.
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let set = read_match_set(&tx, &keywords)?;
        tx.commit()?;
        Ok(set)
      })
      .await?;

    raw.into_match_set()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn get_or_create_pronunciation<'a>(
    &'a self,
    spelling: &'a str,
  ) -> Result<Pronunciation> {
    let spelling = spelling.to_owned();
    let id_str   = encode_uuid(Uuid::new_v4());
    let at_str   = encode_dt(now());

    let raw: RawPronunciation = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO pronunciations (pronunciation_id, spelling, created_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (spelling) DO NOTHING",
          rusqlite::params![id_str, spelling, at_str],
        )?;
        let raw = tx.query_row(
          &format!(
            "SELECT {PRONUNCIATION_COLUMNS} FROM pronunciations p
             WHERE p.spelling = ?1"
          ),
          rusqlite::params![spelling],
          |row| RawPronunciation::from_row(row, 0),
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_pronunciation()
  }

  async fn word_exists(&self, target_code: i64) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM words WHERE target_code = ?1",
              rusqlite::params![target_code],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn find_word(&self, target_code: i64) -> Result<Option<Word>> {
    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {WORD_COLUMNS} FROM words w WHERE w.target_code = ?1"),
            rusqlite::params![target_code],
            |row| RawWord::from_row(row, 0),
          )
          .optional()?)
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  async fn add_word(&self, input: NewWord) -> Result<Option<Word>> {
    let word = Word {
      word_id:          Uuid::new_v4(),
      pronunciation_id: input.pronunciation_id,
      target_code:      input.target_code,
      part:             input.part,
      contents:         input.contents,
      created_at:       now(),
    };

    let word_id_str   = encode_uuid(word.word_id);
    let owner_id_str  = encode_uuid(word.pronunciation_id);
    let target_code   = word.target_code;
    let part_str      = encode_part(word.part);
    let contents      = word.contents.clone();
    let created_str   = encode_dt(word.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO words (
             word_id, pronunciation_id, target_code, part, contents, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (target_code) DO NOTHING",
          rusqlite::params![
            word_id_str,
            owner_id_str,
            target_code,
            part_str,
            contents,
            created_str,
          ],
        )?)
      })
      .await?;

    Ok((inserted == 1).then_some(word))
  }

  async fn add_include_relation(
    &self,
    word_id: Uuid,
    pronunciation_id: Uuid,
  ) -> Result<Option<IncludeWordRelation>> {
    let relation = IncludeWordRelation {
      criteria_id: word_id,
      relation_id: pronunciation_id,
      created_at:  now(),
    };

    let criteria_str = encode_uuid(word_id);
    let relation_str = encode_uuid(pronunciation_id);
    let at_str       = encode_dt(relation.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO include_word_relations (criteria_id, relation_id, created_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (criteria_id, relation_id) DO NOTHING",
          rusqlite::params![criteria_str, relation_str, at_str],
        )?)
      })
      .await?;

    Ok((inserted == 1).then_some(relation))
  }

  async fn add_synonym_relation(
    &self,
    criteria_id: Uuid,
    related_id: Uuid,
  ) -> Result<Option<SynonymsWordRelation>> {
    let relation = SynonymsWordRelation {
      criteria_id,
      related_id,
      created_at: now(),
    };

    let criteria_str = encode_uuid(criteria_id);
    let related_str  = encode_uuid(related_id);
    let at_str       = encode_dt(relation.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO synonyms_word_relations (criteria_id, related_id, created_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (criteria_id, related_id) DO NOTHING",
          rusqlite::params![criteria_str, related_str, at_str],
        )?)
      })
      .await?;

    Ok((inserted == 1).then_some(relation))
  }

  async fn add_sentence(&self, word_id: Uuid, sentence: String) -> Result<Sentence> {
    let sentence_id_str = encode_uuid(Uuid::new_v4());
    let word_id_str     = encode_uuid(word_id);
    let at_str          = encode_dt(now());

    let raw: RawSentence = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let existing = tx
          .query_row(
            "SELECT s.sentence_id, s.sentence, s.created_at
             FROM word_sentence_assocs a
             JOIN sentences s ON s.sentence_id = a.sentence_id
             WHERE a.word_id = ?1 AND s.sentence = ?2",
            rusqlite::params![word_id_str, sentence],
            RawSentence::from_row,
          )
          .optional()?;
        if let Some(raw) = existing {
          return Ok(raw);
        }

        tx.execute(
          "INSERT INTO sentences (sentence_id, sentence, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![sentence_id_str, sentence, at_str],
        )?;
        tx.execute(
          "INSERT INTO word_sentence_assocs (word_id, sentence_id) VALUES (?1, ?2)",
          rusqlite::params![word_id_str, sentence_id_str],
        )?;
        tx.commit()?;
        Ok(RawSentence {
          sentence_id: sentence_id_str,
          sentence,
          created_at: at_str,
        })
      })
      .await?;

    raw.into_sentence()
  }

  async fn mark_scraped(
    &self,
    pronunciation_id: Uuid,
    at: DateTime<Utc>,
  ) -> Result<()> {
    let id_str = encode_uuid(pronunciation_id);
    let at_str = encode_dt(at);

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE pronunciations SET scraped_at = ?2 WHERE pronunciation_id = ?1",
          rusqlite::params![id_str, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Err(Error::PronunciationNotFound(pronunciation_id));
    }
    Ok(())
  }
}
