use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;

use sessionvault::host::{HostTab, HostWindow, StaticWindowProvider};
use sessionvault::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use sessionvault::services::capture::{capture_once, CaptureScheduler};
use sessionvault::storage::{DurableStore, MemoryStore};
use sessionvault::types::tab::TabStatus;

fn backups() -> WindowBackupStore {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    WindowBackupStore::new(durable)
}

fn host_tab(title: &str, url: &str) -> HostTab {
    HostTab {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        fav_icon_url: None,
    }
}

#[tokio::test]
async fn test_capture_stages_one_backup_per_nonempty_window() {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![
        HostWindow {
            id: Some(1),
            tabs: vec![host_tab("One", "https://a.example/"), host_tab("Two", "https://b.example/")],
        },
        HostWindow {
            id: Some(2),
            tabs: vec![],
        },
    ]);

    let stats = capture_once(&provider, &staging).await.unwrap();
    assert_eq!(stats.windows, 1);
    assert_eq!(stats.tabs, 2);

    let all = staging.all().await.unwrap();
    assert_eq!(all.len(), 1);
    let backup = &all[&1];
    assert_eq!(backup.window_id, 1);
    assert_eq!(backup.tabs.len(), 2);
    // Enumeration order is preserved.
    assert_eq!(backup.tabs[0].title, "One");
    assert_eq!(backup.tabs[1].title, "Two");
}

#[rstest]
#[case::no_window_id(HostWindow { id: None, tabs: vec![HostTab { title: Some("T".to_string()), url: Some("https://x.example/".to_string()), fav_icon_url: None }] })]
#[case::zero_tabs(HostWindow { id: Some(9), tabs: vec![] })]
#[tokio::test]
async fn test_capture_skips_window(#[case] window: HostWindow) {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![window]);

    let stats = capture_once(&provider, &staging).await.unwrap();
    assert_eq!(stats.windows, 0);
    assert!(staging.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_capture_fills_in_tab_defaults() {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![HostTab {
            title: None,
            url: None,
            fav_icon_url: Some("https://x.example/icon.png".to_string()),
        }],
    }]);

    capture_once(&provider, &staging).await.unwrap();

    let backup = staging.get(1).await.unwrap().unwrap();
    assert_eq!(backup.tabs[0].title, "Untitled");
    assert_eq!(backup.tabs[0].url, "");
    assert_eq!(backup.tabs[0].status, TabStatus::Pending);
    assert_eq!(
        backup.tabs[0].fav_icon_url.as_deref(),
        Some("https://x.example/icon.png")
    );
}

#[tokio::test]
async fn test_capture_generates_fresh_tab_ids_each_tick() {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![host_tab("Same", "https://same.example/")],
    }]);

    capture_once(&provider, &staging).await.unwrap();
    let first_id = staging.get(1).await.unwrap().unwrap().tabs[0].id.clone();

    capture_once(&provider, &staging).await.unwrap();
    let second_id = staging.get(1).await.unwrap().unwrap().tabs[0].id.clone();

    assert!(first_id.starts_with("tab_"));
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_capture_overwrites_prior_backup_wholesale() {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![
            host_tab("A", "https://a.example/"),
            host_tab("B", "https://b.example/"),
            host_tab("C", "https://c.example/"),
        ],
    }]);
    capture_once(&provider, &staging).await.unwrap();

    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![host_tab("Only", "https://only.example/")],
    }]);
    capture_once(&provider, &staging).await.unwrap();

    let backup = staging.get(1).await.unwrap().unwrap();
    assert_eq!(backup.tabs.len(), 1);
    assert_eq!(backup.tabs[0].title, "Only");
}

#[tokio::test]
async fn test_capture_enumeration_failure_leaves_staging_untouched() {
    let staging = backups();
    let provider = StaticWindowProvider::new();
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![host_tab("Kept", "https://kept.example/")],
    }]);
    capture_once(&provider, &staging).await.unwrap();

    provider.fail_with("host gone");
    assert!(capture_once(&provider, &staging).await.is_err());

    let backup = staging.get(1).await.unwrap().unwrap();
    assert_eq!(backup.tabs[0].title, "Kept");
}

#[tokio::test]
async fn test_capture_no_windows_is_not_an_error() {
    let staging = backups();
    let provider = StaticWindowProvider::new();

    let stats = capture_once(&provider, &staging).await.unwrap();
    assert_eq!(stats.windows, 0);
    assert_eq!(stats.tabs, 0);
}

#[tokio::test]
async fn test_scheduler_first_tick_runs_immediately() {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let staging = WindowBackupStore::new(durable);
    let provider = Arc::new(StaticWindowProvider::new());
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![host_tab("T", "https://t.example/")],
    }]);

    // An hour-long period: only the immediate first tick can stage anything.
    let mut scheduler = CaptureScheduler::new(
        provider.clone(),
        staging.clone(),
        Duration::from_secs(3600),
    );
    scheduler.start();
    assert!(scheduler.is_running());

    let mut staged = false;
    for _ in 0..100 {
        if staging.get(1).await.unwrap().is_some() {
            staged = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    scheduler.stop();
    assert!(staged, "first tick should run at start, not after one period");
}

#[tokio::test]
async fn test_scheduler_stop_cancels_future_ticks() {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let staging = WindowBackupStore::new(durable);
    let provider = Arc::new(StaticWindowProvider::new());
    provider.set_windows(vec![HostWindow {
        id: Some(1),
        tabs: vec![host_tab("T", "https://t.example/")],
    }]);

    let mut scheduler = CaptureScheduler::new(
        provider.clone(),
        staging.clone(),
        Duration::from_millis(20),
    );
    scheduler.start();

    let mut staged = false;
    for _ in 0..100 {
        if staging.get(1).await.unwrap().is_some() {
            staged = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(staged);

    scheduler.stop();
    assert!(!scheduler.is_running());

    // Let any in-flight tick drain, then prove no further ticks fire.
    tokio::time::sleep(Duration::from_millis(60)).await;
    staging.clear_all().await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(staging.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scheduler_start_twice_is_noop() {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let staging = WindowBackupStore::new(durable);
    let provider = Arc::new(StaticWindowProvider::new());

    let mut scheduler = CaptureScheduler::new(
        provider,
        staging,
        Duration::from_millis(20),
    );
    scheduler.start();
    scheduler.start();
    assert!(scheduler.is_running());
    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[tokio::test]
async fn test_scheduler_keeps_ticking_after_enumeration_failures() {
    let durable: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let staging = WindowBackupStore::new(durable);
    let provider = Arc::new(StaticWindowProvider::new());
    provider.fail_with("flaky host");

    let mut scheduler = CaptureScheduler::new(
        provider.clone(),
        staging.clone(),
        Duration::from_millis(20),
    );
    scheduler.start();

    // A few failing ticks pass, then the host comes back.
    tokio::time::sleep(Duration::from_millis(80)).await;
    provider.clear_failure();
    provider.set_windows(vec![HostWindow {
        id: Some(5),
        tabs: vec![host_tab("Back", "https://back.example/")],
    }]);

    let mut staged = false;
    for _ in 0..100 {
        if staging.get(5).await.unwrap().is_some() {
            staged = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    scheduler.stop();
    assert!(staged, "schedule must continue after a failed tick");
}
