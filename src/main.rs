//! SessionVault — tab-session capture, backup, and recovery for browser windows.
//!
//! Entry point: runs a console demo that walks the capture → close →
//! cold-start-recovery → triage flow against an in-memory store and a
//! scripted host.

use std::sync::Arc;
use std::time::Duration;

use sessionvault::app::Background;
use sessionvault::config::BackgroundConfig;
use sessionvault::host::events::HostEvent;
use sessionvault::host::{HostTab, HostWindow, StaticWindowProvider};
use sessionvault::managers::session_repository::{SessionRepository, SessionRepositoryTrait};
use sessionvault::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use sessionvault::services::capture::capture_once;
use sessionvault::services::lifecycle::WindowLifecycleHandler;
use sessionvault::services::recovery::RecoveryEngine;
use sessionvault::managers::note_manager::{NoteManager, NoteManagerTrait};
use sessionvault::storage::{DurableStore, MemoryStore, SqliteStore};
use sessionvault::types::backup::BackupCapture;
use sessionvault::types::note::Note;
use sessionvault::types::tab::{Tab, TabStatus};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sessionvault=info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             SessionVault v{} — Demo Mode                  ║", env!("CARGO_PKG_VERSION"));
    println!("║     Tab-session capture, backup, and recovery vault        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_store().await;
    demo_capture_and_close().await;
    demo_cold_start_recovery().await;
    demo_background_process().await;
    demo_triage().await;

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn host_tab(title: &str, url: &str) -> HostTab {
    HostTab {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        fav_icon_url: None,
    }
}

async fn demo_store() {
    section("Durable Store (SQLite backend)");

    let store = SqliteStore::open_in_memory().expect("Failed to open store");
    let mut watcher = store.watch();

    store
        .set("demo", serde_json::json!({ "hello": "vault" }))
        .await
        .expect("set failed");
    let value = store.get("demo").await.expect("get failed");
    println!("  Stored and read back: {}", value.unwrap());

    let change = watcher.try_recv().expect("no change notification");
    println!("  Change notification fired for key: {}", change.key);

    store.remove("demo").await.expect("remove failed");
    assert!(store.get("demo").await.expect("get failed").is_none());
    println!("  Removed key, read back absent");
    println!("  ✓ Durable store OK");
    println!();
}

async fn demo_capture_and_close() {
    section("Capture Tick + Window Close");

    let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let backups = WindowBackupStore::new(store.clone());
    let sessions = SessionRepository::new(store);

    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![
        HostWindow {
            id: Some(1),
            tabs: vec![
                host_tab("Rust Book", "https://doc.rust-lang.org/book/"),
                host_tab("Crates", "https://crates.io/"),
            ],
        },
        HostWindow {
            id: Some(2),
            tabs: vec![],
        },
    ]);

    let stats = capture_once(&provider, &backups).await.expect("capture failed");
    println!(
        "  Captured {} tab(s) across {} window(s); empty window 2 skipped",
        stats.tabs, stats.windows
    );

    let lifecycle = WindowLifecycleHandler::new(backups.clone(), sessions.clone());
    let session_id = lifecycle
        .handle_window_closed(1)
        .await
        .expect("close handling failed")
        .expect("no session created");
    println!("  Window 1 closed -> session {}", session_id);

    assert!(backups.get(1).await.expect("get failed").is_none());
    println!("  Window 1 staging entry cleared");
    println!("  ✓ Capture + close handling OK");
    println!();
}

async fn demo_cold_start_recovery() {
    section("Cold Start Recovery");

    let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let backups = WindowBackupStore::new(store.clone());
    let sessions = SessionRepository::new(store.clone());

    // Simulate what a previous browser session left behind.
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![
        HostWindow {
            id: Some(10),
            tabs: vec![host_tab("News", "https://news.example.com/")],
        },
        HostWindow {
            id: Some(11),
            tabs: vec![
                host_tab("Mail", "https://mail.example.com/"),
                host_tab("Docs", "https://docs.example.com/"),
            ],
        },
    ]);
    capture_once(&provider, &backups).await.expect("capture failed");
    backups
        .save_legacy(BackupCapture {
            captured_at: 1_700_000_000_000,
            tabs: vec![Tab {
                id: "tab_legacy_1".to_string(),
                title: "Old snapshot".to_string(),
                url: "https://old.example.com/".to_string(),
                status: TabStatus::Pending,
                fav_icon_url: None,
            }],
        })
        .await
        .expect("legacy save failed");

    let engine = RecoveryEngine::new(backups.clone(), sessions.clone());
    let report = engine.recover().await.expect("recovery failed");
    println!(
        "  Recovered {} window backup(s) + legacy={}, staging cleared={}",
        report.windows_recovered, report.legacy_recovered, report.staging_cleared
    );

    let all = sessions.list().await.expect("list failed");
    println!("  Session list now holds {} session(s)", all.len());
    assert!(backups.all().await.expect("all failed").is_empty());
    println!("  ✓ Recovery engine OK");
    println!();
}

async fn demo_background_process() {
    section("Background Process (event-driven)");

    let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let provider = Arc::new(StaticWindowProvider::new());
    provider.set_windows(vec![HostWindow {
        id: Some(7),
        tabs: vec![host_tab("Dashboard", "https://dash.example.com/")],
    }]);

    let config = BackgroundConfig {
        capture_interval_millis: 100,
    };
    let background = Background::new(store.clone(), provider.clone(), config);
    let handle = background.attach();

    handle
        .events()
        .send(HostEvent::Startup)
        .expect("event send failed");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let backups = WindowBackupStore::new(store.clone());
    let staged = backups.all().await.expect("all failed");
    println!("  After startup: {} window(s) staged by the scheduler", staged.len());

    handle
        .events()
        .send(HostEvent::WindowClosed(7))
        .expect("event send failed");
    tokio::time::sleep(Duration::from_millis(50)).await;

    let sessions = SessionRepository::new(store);
    println!(
        "  After close event: {} session(s) in the vault",
        sessions.list().await.expect("list failed").len()
    );

    handle.detach().await;
    println!("  Detached background event loop");
    println!("  ✓ Background process OK");
    println!();
}

async fn demo_triage() {
    section("Session Triage + Notes");

    let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let backups = WindowBackupStore::new(store.clone());
    let sessions = SessionRepository::new(store.clone());
    let notes = NoteManager::new(store);

    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![HostWindow {
        id: Some(3),
        tabs: vec![host_tab("Reading list", "https://reads.example.com/")],
    }]);
    capture_once(&provider, &backups).await.expect("capture failed");

    let lifecycle = WindowLifecycleHandler::new(backups, sessions.clone());
    let session_id = lifecycle
        .handle_window_closed(3)
        .await
        .expect("close handling failed")
        .expect("no session created");

    let metadata = sessions.metadata().await.expect("metadata failed");
    println!(
        "  Session {}: {} tab(s), {} pending",
        metadata[0].id, metadata[0].tab_count, metadata[0].pending_tab_count
    );

    sessions.archive(&session_id).await.expect("archive failed");
    sessions.restore(&session_id).await.expect("restore failed");
    println!("  Archived and restored the session");

    let tab_id = sessions
        .get(&session_id)
        .await
        .expect("get failed")
        .expect("session missing")
        .tabs[0]
        .id
        .clone();
    notes
        .save(Note {
            session_id: session_id.clone(),
            tab_id: tab_id.clone(),
            text: "Finish reading this one".to_string(),
        })
        .await
        .expect("note save failed");
    let note = notes
        .get(&session_id, &tab_id)
        .await
        .expect("note get failed")
        .expect("note missing");
    println!("  Note on tab: \"{}\"", note.text);
    println!("  ✓ Triage + notes OK");
    println!();
}
