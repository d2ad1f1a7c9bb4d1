use serde_json::json;

use sessionvault::database::{migrations, Database};
use sessionvault::storage::{DurableStore, MemoryStore, SqliteStore};

#[tokio::test]
async fn test_memory_store_set_get_roundtrip() {
    let store = MemoryStore::new();
    store.set("alpha", json!({ "n": 1 })).await.unwrap();
    let value = store.get("alpha").await.unwrap();
    assert_eq!(value, Some(json!({ "n": 1 })));
}

#[tokio::test]
async fn test_memory_store_get_absent_returns_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_memory_store_set_overwrites() {
    let store = MemoryStore::new();
    store.set("key", json!(1)).await.unwrap();
    store.set("key", json!(2)).await.unwrap();
    assert_eq!(store.get("key").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn test_memory_store_remove_absent_is_noop() {
    let store = MemoryStore::new();
    store.remove("missing").await.unwrap();
}

#[tokio::test]
async fn test_memory_store_remove_deletes() {
    let store = MemoryStore::new();
    store.set("key", json!("v")).await.unwrap();
    store.remove("key").await.unwrap();
    assert_eq!(store.get("key").await.unwrap(), None);
}

#[tokio::test]
async fn test_memory_store_notifies_on_write_and_remove() {
    let store = MemoryStore::new();
    let mut watcher = store.watch();

    store.set("sessions", json!([])).await.unwrap();
    let change = watcher.try_recv().unwrap();
    assert_eq!(change.key, "sessions");

    store.remove("sessions").await.unwrap();
    let change = watcher.try_recv().unwrap();
    assert_eq!(change.key, "sessions");
}

#[tokio::test]
async fn test_sqlite_store_set_get_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .set("windowBackups", json!({ "42": { "timestamp": 1, "tabs": [] } }))
        .await
        .unwrap();
    let value = store.get("windowBackups").await.unwrap();
    assert_eq!(
        value,
        Some(json!({ "42": { "timestamp": 1, "tabs": [] } }))
    );
}

#[tokio::test]
async fn test_sqlite_store_remove() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("key", json!("v")).await.unwrap();
    store.remove("key").await.unwrap();
    assert_eq!(store.get("key").await.unwrap(), None);
    // Removing again is still fine.
    store.remove("key").await.unwrap();
}

#[tokio::test]
async fn test_sqlite_store_notifies_on_write() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut watcher = store.watch();
    store.set("notes", json!([])).await.unwrap();
    assert_eq!(watcher.try_recv().unwrap().key, "notes");
}

#[tokio::test]
async fn test_sqlite_store_persists_across_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vault.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set("sessions", json!([{ "id": "s1" }])).await.unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(
        store.get("sessions").await.unwrap(),
        Some(json!([{ "id": "s1" }]))
    );
}

#[test]
fn test_migrations_record_schema_version() {
    let db = Database::open_in_memory().unwrap();
    let version = db.with_connection(migrations::get_schema_version);
    assert_eq!(version, migrations::CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    db.with_connection(|conn| migrations::run_all(conn)).unwrap();
    let version = db.with_connection(migrations::get_schema_version);
    assert_eq!(version, migrations::CURRENT_SCHEMA_VERSION);
}
