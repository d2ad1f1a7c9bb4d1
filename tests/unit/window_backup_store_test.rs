use std::sync::Arc;

use sessionvault::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use sessionvault::storage::{DurableStore, MemoryStore};
use sessionvault::types::backup::{BackupCapture, WindowBackup};
use sessionvault::types::tab::{Tab, TabStatus};

fn store() -> WindowBackupStore {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    WindowBackupStore::new(durable)
}

fn tab(id: &str, title: &str) -> Tab {
    Tab {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://example.com/{}", id),
        status: TabStatus::Pending,
        fav_icon_url: None,
    }
}

fn backup(window_id: u64, captured_at: i64, tabs: Vec<Tab>) -> WindowBackup {
    WindowBackup {
        window_id,
        captured_at,
        tabs,
    }
}

#[tokio::test]
async fn test_save_then_get_roundtrip() {
    let backups = store();
    let b = backup(42, 1000, vec![tab("t1", "One"), tab("t2", "Two")]);
    backups.save(b.clone()).await.unwrap();

    let got = backups.get(42).await.unwrap().unwrap();
    assert_eq!(got, b);
}

#[tokio::test]
async fn test_get_absent_window_returns_none() {
    let backups = store();
    assert!(backups.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_overwrites_wholesale() {
    let backups = store();
    backups
        .save(backup(42, 1000, vec![tab("t1", "One"), tab("t2", "Two")]))
        .await
        .unwrap();
    backups
        .save(backup(42, 2000, vec![tab("t3", "Three")]))
        .await
        .unwrap();

    let got = backups.get(42).await.unwrap().unwrap();
    assert_eq!(got.captured_at, 2000);
    assert_eq!(got.tabs.len(), 1);
    assert_eq!(got.tabs[0].id, "t3");
}

#[tokio::test]
async fn test_all_returns_every_staged_window() {
    let backups = store();
    backups.save(backup(7, 1, vec![tab("a", "A")])).await.unwrap();
    backups.save(backup(42, 2, vec![tab("b", "B")])).await.unwrap();

    let all = backups.all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains_key(&7));
    assert!(all.contains_key(&42));
}

#[tokio::test]
async fn test_clear_removes_only_target_window() {
    let backups = store();
    backups.save(backup(7, 1, vec![tab("a", "A")])).await.unwrap();
    backups.save(backup(42, 2, vec![tab("b", "B")])).await.unwrap();

    backups.clear(42).await.unwrap();

    assert!(backups.get(42).await.unwrap().is_none());
    assert!(backups.get(7).await.unwrap().is_some());
}

#[tokio::test]
async fn test_clear_absent_window_is_noop() {
    let backups = store();
    // Nothing staged at all.
    backups.clear(42).await.unwrap();

    // Something staged, but not this window.
    backups.save(backup(7, 1, vec![tab("a", "A")])).await.unwrap();
    backups.clear(42).await.unwrap();
    assert!(backups.get(7).await.unwrap().is_some());
}

#[tokio::test]
async fn test_clear_twice_is_noop() {
    let backups = store();
    backups.save(backup(42, 1, vec![tab("a", "A")])).await.unwrap();
    backups.clear(42).await.unwrap();
    backups.clear(42).await.unwrap();
    assert!(backups.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_all_empties_staging() {
    let backups = store();
    backups.save(backup(7, 1, vec![tab("a", "A")])).await.unwrap();
    backups.save(backup(42, 2, vec![tab("b", "B")])).await.unwrap();

    backups.clear_all().await.unwrap();
    assert!(backups.all().await.unwrap().is_empty());

    // Bulk-clearing an already-empty staging area is fine.
    backups.clear_all().await.unwrap();
}

#[tokio::test]
async fn test_legacy_slot_roundtrip() {
    let backups = store();
    assert!(backups.legacy().await.unwrap().is_none());

    let legacy = BackupCapture {
        captured_at: 500,
        tabs: vec![tab("old", "Old")],
    };
    backups.save_legacy(legacy.clone()).await.unwrap();
    assert_eq!(backups.legacy().await.unwrap().unwrap(), legacy);

    backups.clear_legacy().await.unwrap();
    assert!(backups.legacy().await.unwrap().is_none());

    // Clearing an absent legacy slot is a no-op.
    backups.clear_legacy().await.unwrap();
}

#[tokio::test]
async fn test_legacy_slot_independent_of_window_backups() {
    let backups = store();
    backups.save(backup(42, 1, vec![tab("a", "A")])).await.unwrap();
    backups
        .save_legacy(BackupCapture {
            captured_at: 500,
            tabs: vec![tab("old", "Old")],
        })
        .await
        .unwrap();

    backups.clear_all().await.unwrap();
    assert!(backups.legacy().await.unwrap().is_some());

    backups.clear_legacy().await.unwrap();
    assert!(backups.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stored_wire_format_keys_entries_by_window_id() {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let backups = WindowBackupStore::new(durable.clone());
    backups.save(backup(42, 1000, vec![tab("t1", "One")])).await.unwrap();

    let raw = durable.get("windowBackups").await.unwrap().unwrap();
    let entry = &raw["42"];
    assert_eq!(entry["timestamp"], 1000);
    assert_eq!(entry["tabs"][0]["id"], "t1");
    assert_eq!(entry["tabs"][0]["status"], "pending");
}
