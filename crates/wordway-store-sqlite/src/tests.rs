//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use wordway_core::{
  pronunciation::Pronunciation,
  query::MatchQuery,
  resolve::Priority,
  search::SearchService,
  store::DictionaryStore,
  word::{NewWord, Word, WordPart},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn pronunciation(s: &SqliteStore, spelling: &str) -> Pronunciation {
  s.get_or_create_pronunciation(spelling).await.unwrap()
}

async fn word(
  s: &SqliteStore,
  owner: &Pronunciation,
  target_code: i64,
  contents: &str,
) -> Word {
  s.add_word(NewWord {
    pronunciation_id: owner.pronunciation_id,
    target_code,
    part: WordPart::Verb,
    contents: contents.into(),
  })
  .await
  .unwrap()
  .expect("fresh target code")
}

fn service(s: SqliteStore) -> SearchService<SqliteStore> {
  SearchService::new(Arc::new(s))
}

// ─── Pronunciations ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_or_create_pronunciation_is_idempotent() {
  let s = store().await;

  let first = pronunciation(&s, "떼다").await;
  let second = pronunciation(&s, "떼다").await;
  assert_eq!(first.pronunciation_id, second.pronunciation_id);
  assert!(first.scraped_at.is_none());

  let found = s.find_pronunciation("떼다").await.unwrap().unwrap();
  assert_eq!(found.pronunciation_id, first.pronunciation_id);
  assert!(s.find_pronunciation("떼").await.unwrap().is_none());
}

#[tokio::test]
async fn get_pronunciation_missing_returns_none() {
  let s = store().await;
  assert!(s.get_pronunciation(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn mark_scraped_sets_timestamp() {
  let s = store().await;
  let p = pronunciation(&s, "사과").await;

  let at = Utc::now();
  s.mark_scraped(p.pronunciation_id, at).await.unwrap();

  let fetched = s.get_pronunciation(p.pronunciation_id).await.unwrap().unwrap();
  let scraped_at = fetched.scraped_at.expect("scraped_at set");
  assert_eq!(scraped_at.timestamp_micros(), at.timestamp_micros());
}

#[tokio::test]
async fn mark_scraped_unknown_pronunciation_errors() {
  let s = store().await;
  let err = s.mark_scraped(Uuid::new_v4(), Utc::now()).await.unwrap_err();
  assert!(matches!(err, crate::Error::PronunciationNotFound(_)));
}

// ─── Words ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_word_skips_taken_target_code() {
  let s = store().await;
  let p = pronunciation(&s, "떼다").await;

  assert!(!s.word_exists(42).await.unwrap());
  let w = word(&s, &p, 42, "붙어 있거나 잇닿은 것을 떨어지게 하다.").await;
  assert!(s.word_exists(42).await.unwrap());

  let duplicate = s
    .add_word(NewWord {
      pronunciation_id: p.pronunciation_id,
      target_code:      42,
      part:             WordPart::Noun,
      contents:         "다른 뜻".into(),
    })
    .await
    .unwrap();
  assert!(duplicate.is_none());

  let words = s.list_words(p.pronunciation_id).await.unwrap();
  assert_eq!(words, vec![w]);
}

#[tokio::test]
async fn list_words_orders_by_target_code() {
  let s = store().await;
  let p = pronunciation(&s, "눈").await;
  word(&s, &p, 30, "셋째").await;
  word(&s, &p, 10, "첫째").await;
  word(&s, &p, 20, "둘째").await;

  let codes: Vec<_> = s
    .list_words(p.pronunciation_id)
    .await
    .unwrap()
    .iter()
    .map(|w| w.target_code)
    .collect();
  assert_eq!(codes, [10, 20, 30]);
}

#[tokio::test]
async fn find_word_by_target_code() {
  let s = store().await;
  let p = pronunciation(&s, "떼다").await;
  let w = word(&s, &p, 7, "떨어지게 하다").await;

  assert_eq!(s.find_word(7).await.unwrap(), Some(w));
  assert!(s.find_word(8).await.unwrap().is_none());
}

#[tokio::test]
async fn add_word_for_unknown_pronunciation_errors() {
  let s = store().await;
  let result = s
    .add_word(NewWord {
      pronunciation_id: Uuid::new_v4(),
      target_code:      1,
      part:             WordPart::Noun,
      contents:         "뜻".into(),
    })
    .await;
  assert!(matches!(result, Err(crate::Error::Database(_))));
}

// ─── Relations and sentences ─────────────────────────────────────────────────

#[tokio::test]
async fn relations_are_idempotent() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  let w = word(&s, &apple, 1, "사과나무의 열매").await;

  let first = s
    .add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();
  assert!(first.is_some());
  let again = s
    .add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();
  assert!(again.is_none());

  let first = s
    .add_include_relation(w.word_id, alias.pronunciation_id)
    .await
    .unwrap();
  assert!(first.is_some());
  let again = s
    .add_include_relation(w.word_id, alias.pronunciation_id)
    .await
    .unwrap();
  assert!(again.is_none());
}

#[tokio::test]
async fn sentences_attach_in_order() {
  let s = store().await;
  let p = pronunciation(&s, "떼다").await;
  let w = word(&s, &p, 1, "떨어지게 하다").await;

  s.add_sentence(w.word_id, "벽에서 벽지를 떼다.".into()).await.unwrap();
  s.add_sentence(w.word_id, "아이를 젖을 떼다.".into()).await.unwrap();

  let sentences: Vec<_> = s
    .list_sentences(w.word_id)
    .await
    .unwrap()
    .into_iter()
    .map(|s| s.sentence)
    .collect();
  assert_eq!(sentences, ["벽에서 벽지를 떼다.", "아이를 젖을 떼다."]);
}

#[tokio::test]
async fn sentences_are_idempotent_per_word() {
  let s = store().await;
  let p = pronunciation(&s, "떼다").await;
  let w1 = word(&s, &p, 1, "떨어지게 하다").await;
  let w2 = word(&s, &p, 2, "덜어 내다").await;

  let first = s.add_sentence(w1.word_id, "벽지를 떼다.".into()).await.unwrap();
  let again = s.add_sentence(w1.word_id, "벽지를 떼다.".into()).await.unwrap();
  assert_eq!(first, again);
  assert_eq!(s.list_sentences(w1.word_id).await.unwrap(), vec![first.clone()]);

  // The same text on another word is a separate example.
  let other = s.add_sentence(w2.word_id, "벽지를 떼다.".into()).await.unwrap();
  assert_ne!(other.sentence_id, first.sentence_id);
  assert_eq!(s.list_sentences(w2.word_id).await.unwrap().len(), 1);
}

// ─── Match resolution ────────────────────────────────────────────────────────

#[tokio::test]
async fn exact_keyword_with_single_word() {
  let s = store().await;
  let p = pronunciation(&s, "떼다").await;
  word(&s, &p, 1, "붙어 있거나 잇닿은 것을 떨어지게 하다.").await;

  let records = service(s).search(["떼다"]).await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].id, p.pronunciation_id);
  assert_eq!(records[0].priority, Priority::Exact);
  assert_eq!(records[0].words.len(), 1);
  assert_eq!(
    records[0].words[0].contents,
    "붙어 있거나 잇닿은 것을 떨어지게 하다."
  );
}

#[tokio::test]
async fn exact_group_matches_by_substring() {
  let s = store().await;
  pronunciation(&s, "사과").await;
  pronunciation(&s, "사과나무").await;
  pronunciation(&s, "배").await;

  let records = service(s).search(["사과"]).await.unwrap();
  let spellings: Vec<_> = records.iter().map(|r| r.pronunciation.as_str()).collect();
  assert_eq!(spellings, ["사과", "사과나무"]);
  assert!(records.iter().all(|r| r.priority == Priority::Exact));
}

#[tokio::test]
async fn substring_match_is_literal() {
  let s = store().await;
  pronunciation(&s, "사과").await;

  let records = service(s).search(["%", "_"]).await.unwrap();
  assert!(records.is_empty());
}

#[tokio::test]
async fn synonym_target_is_priority_one() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  s.add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();

  let records = service(s).search(["애플"]).await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].pronunciation, "애플");
  assert_eq!(records[0].priority, Priority::Exact);
  assert_eq!(records[1].pronunciation, "사과");
  assert_eq!(records[1].priority, Priority::Synonym);
  assert_eq!(records[1].related_words, ["애플"]);
}

#[tokio::test]
async fn synonym_group_requires_exact_spelling() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  s.add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();

  let set = s.resolve_matches(&MatchQuery::new(["애"])).await.unwrap();
  assert_eq!(set.exact.len(), 1);
  assert!(set.synonym.is_empty());
}

#[tokio::test]
async fn exact_and_synonym_match_appears_once_at_priority_zero() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  s.add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();

  let records = service(s).search(["사과", "애플"]).await.unwrap();
  let apples: Vec<_> = records
    .iter()
    .filter(|r| r.id == apple.pronunciation_id)
    .collect();
  assert_eq!(apples.len(), 1);
  assert_eq!(apples[0].priority, Priority::Exact);
}

#[tokio::test]
async fn inclusion_word_nests_alone_at_priority_two() {
  let s = store().await;
  let detach = pronunciation(&s, "떼다").await;
  let touching = pronunciation(&s, "잇닿다").await;
  let w1 = word(&s, &detach, 1, "붙어 있거나 잇닿은 것을 떨어지게 하다.").await;
  word(&s, &detach, 2, "어떤 일을 끝내다.").await;
  s.add_include_relation(w1.word_id, touching.pronunciation_id)
    .await
    .unwrap();

  let records = service(s).search(["잇닿다"]).await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].pronunciation, "잇닿다");
  assert_eq!(records[0].priority, Priority::Exact);

  let included = &records[1];
  assert_eq!(included.id, detach.pronunciation_id);
  assert_eq!(included.priority, Priority::Inclusion);
  assert_eq!(included.words.len(), 1);
  assert_eq!(included.words[0].id, w1.word_id);
  assert_eq!(included.words[0].related_pronunciations, ["잇닿다"]);
}

#[tokio::test]
async fn empty_keywords_list_every_pronunciation() {
  let s = store().await;
  let a = pronunciation(&s, "가").await;
  let b = pronunciation(&s, "나").await;
  s.add_synonym_relation(a.pronunciation_id, b.pronunciation_id)
    .await
    .unwrap();

  let records = service(s).search(Vec::<String>::new()).await.unwrap();
  assert_eq!(records.len(), 2);
  assert!(records.iter().all(|r| r.priority == Priority::Exact));
  assert_eq!(records[0].related_words, ["나"]);
}

#[tokio::test]
async fn keywords_are_trimmed_before_matching() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  s.add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();

  let records = service(s).search(["  애플 "]).await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[1].priority, Priority::Synonym);
}

#[tokio::test]
async fn no_match_is_empty_not_error() {
  let s = store().await;
  pronunciation(&s, "사과").await;

  let records = service(s).search(["바나나"]).await.unwrap();
  assert!(records.is_empty());
}

#[tokio::test]
async fn results_are_unique_and_priority_ordered() {
  let s = store().await;
  let hub = pronunciation(&s, "말").await;
  let horse = pronunciation(&s, "말馬").await;
  let speech = pronunciation(&s, "언어").await;
  let talk = pronunciation(&s, "이야기").await;
  let w_speech = word(&s, &speech, 1, "생각을 나타내는 말").await;
  let w_talk = word(&s, &talk, 2, "말로 하는 것").await;
  s.add_synonym_relation(speech.pronunciation_id, hub.pronunciation_id)
    .await
    .unwrap();
  s.add_synonym_relation(horse.pronunciation_id, hub.pronunciation_id)
    .await
    .unwrap();
  s.add_include_relation(w_speech.word_id, hub.pronunciation_id)
    .await
    .unwrap();
  s.add_include_relation(w_talk.word_id, hub.pronunciation_id)
    .await
    .unwrap();

  let query = MatchQuery::new(["말"]);
  let records = service(s).search(query.keywords()).await.unwrap();

  let mut ids: Vec<_> = records.iter().map(|r| r.id).collect();
  ids.sort();
  ids.dedup();
  assert_eq!(ids.len(), records.len());

  assert!(records.windows(2).all(|w| w[0].priority <= w[1].priority));
  for r in records.iter().filter(|r| r.priority == Priority::Exact) {
    assert!(query.contains_match(&r.pronunciation));
  }

  let by_spelling = |s: &str| records.iter().find(|r| r.pronunciation == s).unwrap();
  assert_eq!(by_spelling("말").priority, Priority::Exact);
  assert_eq!(by_spelling("말馬").priority, Priority::Exact);
  assert_eq!(by_spelling("언어").priority, Priority::Synonym);
  assert_eq!(by_spelling("이야기").priority, Priority::Inclusion);
  assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn exact_ties_follow_creation_order() {
  let s = store().await;
  pronunciation(&s, "사과나무").await;
  pronunciation(&s, "사과").await;

  let records = service(s).search(["사과"]).await.unwrap();
  let spellings: Vec<_> = records.iter().map(|r| r.pronunciation.as_str()).collect();
  assert_eq!(spellings, ["사과나무", "사과"]);
}

#[tokio::test]
async fn inclusion_and_relation_ties_follow_insertion_order() {
  let s = store().await;
  let fruit = pronunciation(&s, "열매").await;
  let tree = pronunciation(&s, "나무").await;
  // Owners created in reverse lexical order.
  let first_owner = pronunciation(&s, "하다").await;
  let second_owner = pronunciation(&s, "가다").await;

  // target_codes run opposite to insertion order.
  let w20 = word(&s, &first_owner, 20, "둘째 뜻").await;
  let w10 = word(&s, &first_owner, 10, "첫째 뜻").await;
  let w5 = word(&s, &second_owner, 5, "다른 뜻").await;
  for w in [&w20, &w10, &w5] {
    s.add_include_relation(w.word_id, fruit.pronunciation_id)
      .await
      .unwrap();
  }
  s.add_include_relation(w10.word_id, tree.pronunciation_id)
    .await
    .unwrap();

  // Synonym edges inserted in reverse lexical order.
  let make = pronunciation(&s, "짓다").await;
  let grow = pronunciation(&s, "가꾸다").await;
  for related in [&make, &grow] {
    s.add_synonym_relation(first_owner.pronunciation_id, related.pronunciation_id)
      .await
      .unwrap();
  }

  let records = service(s).search(["열매"]).await.unwrap();

  let order: Vec<_> = records
    .iter()
    .map(|r| (r.pronunciation.as_str(), r.priority))
    .collect();
  assert_eq!(order, [
    ("열매", Priority::Exact),
    ("하다", Priority::Inclusion),
    ("가다", Priority::Inclusion),
  ]);

  let first_words: Vec<_> = records[1].words.iter().map(|w| w.id).collect();
  assert_eq!(first_words, [w10.word_id, w20.word_id]);
  assert_eq!(records[1].words[0].related_pronunciations, ["열매", "나무"]);
  assert_eq!(records[1].related_words, ["짓다", "가꾸다"]);

  let second_words: Vec<_> = records[2].words.iter().map(|w| w.id).collect();
  assert_eq!(second_words, [w5.word_id]);
}

#[tokio::test]
async fn keyword_count_is_not_bounded_by_parameter_limit() {
  let s = store().await;
  let apple = pronunciation(&s, "사과").await;
  let alias = pronunciation(&s, "애플").await;
  s.add_synonym_relation(apple.pronunciation_id, alias.pronunciation_id)
    .await
    .unwrap();

  // More keywords than SQLite's default host parameter limit (32766).
  let mut keywords: Vec<String> = (0..40_000).map(|i| format!("없는말{i}")).collect();
  keywords.push("애플".into());

  let records = service(s).search(&keywords).await.unwrap();
  let order: Vec<_> = records
    .iter()
    .map(|r| (r.pronunciation.as_str(), r.priority))
    .collect();
  assert_eq!(order, [("애플", Priority::Exact), ("사과", Priority::Synonym)]);
}
