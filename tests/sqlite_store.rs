//! Integration tests for the SQLite prompt store against a real file.

use prompt_enhancer::config::StorageConfig;
use prompt_enhancer::storage::{NewPromptRecord, PromptStore, SqliteStore, fingerprint, open_store};
use prompt_enhancer::{PromptParameters, PromptService};
use tempfile::TempDir;

fn record(user: &str, input: &str) -> NewPromptRecord {
    NewPromptRecord {
        original_input: input.to_string(),
        transformed_prompt: format!("Structured: {}", input),
        frameworks: vec!["TFCDC".to_string()],
        parameters: PromptParameters::default(),
        use_case: "technical".to_string(),
        user_id: user.to_string(),
    }
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("prompts.db");

    let id = {
        let store = SqliteStore::open(&path).await.unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        store.save(record("alice", "document the API")).await.unwrap()
    };

    let reopened = SqliteStore::open(&path).await.unwrap();
    let listed = reopened.list_by_user("alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].original_input, "document the API");
    assert_eq!(listed[0].fingerprint, fingerprint("Structured: document the API"));
    assert_eq!(listed[0].parameters, PromptParameters::default());
}

#[tokio::test]
async fn open_store_selects_backend() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        backend: "sqlite".to_string(),
        sqlite_path: dir.path().join("prompts.db"),
    };
    let store = open_store(&config).await.unwrap();
    store.save(record("bob", "x")).await.unwrap();
    assert!(dir.path().join("prompts.db").exists());

    let memory = open_store(&StorageConfig {
        backend: "memory".to_string(),
        sqlite_path: dir.path().join("unused.db"),
    })
    .await
    .unwrap();
    assert!(memory.list_recent(5).await.unwrap().is_empty());
    assert!(!dir.path().join("unused.db").exists());

    let bad = open_store(&StorageConfig {
        backend: "firestore".to_string(),
        sqlite_path: dir.path().join("bad.db"),
    })
    .await;
    assert!(bad.is_err());
}

#[tokio::test]
async fn service_saves_through_sqlite() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(&dir.path().join("prompts.db")).await.unwrap();
    let service = PromptService::with_store(std::sync::Arc::new(store));

    let first = service
        .enhance_and_save("Write a poem about rain", &PromptParameters::default(), Some("carol"))
        .await
        .unwrap();
    let second = service
        .enhance_and_save(
            "Write technical API documentation",
            &PromptParameters::default(),
            Some("carol"),
        )
        .await
        .unwrap();

    let store = service.store().unwrap();
    let listed = store.list_by_user("carol").await.unwrap();
    let ids: Vec<Option<String>> = listed.iter().map(|p| Some(p.id.clone())).collect();
    assert_eq!(ids, vec![second.saved_id, first.saved_id]);
    assert_eq!(listed[0].use_case, "technical");
    assert_eq!(listed[1].use_case, "creative");
}
