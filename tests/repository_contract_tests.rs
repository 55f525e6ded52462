use std::sync::Arc;

use wiki_quiz_server::{
    models::domain::{Difficulty, KeyEntities, QuizQuestion, QuizRecord},
    repositories::{InMemoryKeyValueStore, KeyValueStore, KvQuizRepository, QuizRepository},
};

fn record(id: i64, title: &str) -> QuizRecord {
    QuizRecord {
        id,
        url: format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
        title: title.to_string(),
        summary: format!("{} summary", title),
        key_entities: KeyEntities {
            people: vec!["Alan Turing".to_string()],
            organizations: vec![],
            locations: vec!["Bletchley Park".to_string()],
        },
        sections: vec!["Early life".to_string()],
        quiz: vec![QuizQuestion {
            question: format!("What is {}?", title),
            options: vec!["A".to_string(), "B".to_string()],
            answer: "A".to_string(),
            difficulty: Difficulty::Easy,
            explanation: "Because.".to_string(),
        }],
        related_topics: vec!["Enigma".to_string()],
        timestamp: "2024-05-01T12:00:00.000Z".to_string(),
    }
}

fn repository() -> (Arc<InMemoryKeyValueStore>, KvQuizRepository) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let repository = KvQuizRepository::new(store.clone());
    (store, repository)
}

#[tokio::test]
async fn store_lists_only_matching_prefix() {
    let store = InMemoryKeyValueStore::new();
    store.set("quiz:1", "a".to_string()).await.unwrap();
    store.set("quiz:2", "b".to_string()).await.unwrap();
    store.set("quizzical", "c".to_string()).await.unwrap();
    store.set("settings:theme", "dark".to_string()).await.unwrap();

    let mut keys = store.list("quiz:").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["quiz:1".to_string(), "quiz:2".to_string()]);
    assert_eq!(store.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn store_set_overwrites() {
    let store = InMemoryKeyValueStore::new();
    store.set("quiz:1", "first".to_string()).await.unwrap();
    store.set("quiz:1", "second".to_string()).await.unwrap();

    assert_eq!(store.get("quiz:1").await.unwrap().as_deref(), Some("second"));
    assert_eq!(store.list("quiz:").await.unwrap().len(), 1);
}

#[tokio::test]
async fn saved_record_reads_back_unchanged() {
    let (_, repository) = repository();
    let saved = record(1714564800000, "Alan Turing");

    repository.save(&saved).await.unwrap();

    let loaded = repository.find_by_id(saved.id).await.unwrap();
    assert_eq!(loaded, Some(saved));
    assert_eq!(repository.find_by_id(1).await.unwrap(), None);
}

#[tokio::test]
async fn history_is_newest_first() {
    let (_, repository) = repository();
    for (id, title) in [(200, "Second"), (100, "First"), (300, "Third")] {
        repository.save(&record(id, title)).await.unwrap();
    }

    let history = repository.list_history().await.unwrap();
    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![300, 200, 100]);
}

#[tokio::test]
async fn loading_history_twice_is_stable() {
    let (_, repository) = repository();
    repository.save(&record(1, "One")).await.unwrap();
    repository.save(&record(2, "Two")).await.unwrap();

    let first = repository.list_history().await.unwrap();
    let second = repository.list_history().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn corrupt_entries_are_skipped() {
    let (store, repository) = repository();
    repository.save(&record(1, "Readable")).await.unwrap();
    store.set("quiz:2", "{not json".to_string()).await.unwrap();
    store
        .set("unrelated:3", "{not json either".to_string())
        .await
        .unwrap();

    let history = repository.list_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Readable");
}

#[tokio::test]
async fn records_missing_optional_fields_still_load() {
    let (store, repository) = repository();
    store
        .set(
            "quiz:9",
            r#"{"id":9,"title":"Sparse","quiz":[]}"#.to_string(),
        )
        .await
        .unwrap();

    let loaded = repository.find_by_id(9).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Sparse");
    assert!(loaded.sections.is_empty());
    assert!(loaded.key_entities.people.is_empty());
    assert_eq!(loaded.summary, "");
}
