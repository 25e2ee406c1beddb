//! Integration Tests: ヘルスチェック監視ループ
//!
//! 監視ループと永続化・通知の結合動作を検証する

use async_trait::async_trait;
use healthwatch::common::{ServiceRecord, WatchResult};
use healthwatch::health::HealthMonitor;
use healthwatch::notify::NotificationSink;
use healthwatch::registry::ServiceRegistry;
use healthwatch::storage::{JsonStore, ServiceRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 通知を記録するテスト用シンク
#[derive(Default)]
struct RecordingNotifier {
    downs: Mutex<Vec<String>>,
    ups: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn notify_down(&self, record: &ServiceRecord) {
        self.downs.lock().unwrap().push(record.name.clone());
    }

    async fn notify_up(&self, record: &ServiceRecord) {
        self.ups.lock().unwrap().push(record.name.clone());
    }
}

/// 保存回数を数えるストアラッパー
struct CountingStore {
    inner: JsonStore,
    saves: AtomicUsize,
}

impl CountingStore {
    fn new(inner: JsonStore) -> Self {
        Self {
            inner,
            saves: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ServiceRepository for CountingStore {
    async fn load(&self) -> WatchResult<HashMap<String, ServiceRecord>> {
        self.inner.load().await
    }

    async fn save(&self, services: &HashMap<String, ServiceRecord>) -> WatchResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(services).await
    }
}

/// down遷移がスナップショットへ書き込まれ、再起動後も残る
#[tokio::test]
async fn down_transition_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("services.json");

    let notifier = Arc::new(RecordingNotifier::default());
    {
        let registry = ServiceRegistry::new(Arc::new(JsonStore::new(&path)))
            .await
            .expect("registry");
        let mut record = ServiceRecord::new("svc1", server.uri());
        record.is_up = true;
        registry.add(record.clone()).await.expect("add");

        let monitor = HealthMonitor::new(registry, notifier.clone());
        monitor.check_service(record).await;
    }

    // 別プロセス相当の再読込でdown状態とタイムスタンプが残っている
    let reloaded = ServiceRegistry::new(Arc::new(JsonStore::new(&path)))
        .await
        .expect("reload");
    let record = reloaded.get("svc1").await.expect("persisted record");
    assert!(!record.is_up);
    assert!(record.last_down.is_some());
    assert_eq!(*notifier.downs.lock().unwrap(), vec!["svc1"]);
}

/// 定常状態のプローブは永続化も通知も発生させない
#[tokio::test]
async fn steady_state_cycles_do_not_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("services.json");
    let store = Arc::new(CountingStore::new(JsonStore::new(&path)));

    let registry = ServiceRegistry::new(store.clone()).await.expect("registry");
    let mut record = ServiceRecord::new("svc1", server.uri());
    record.is_up = true;
    registry.add(record.clone()).await.expect("add");

    let saves_after_add = store.saves.load(Ordering::SeqCst);
    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = HealthMonitor::new(registry, notifier.clone());

    for _ in 0..3 {
        monitor.check_service(record.clone()).await;
    }

    assert_eq!(store.saves.load(Ordering::SeqCst), saves_after_add);
    assert!(notifier.ups.lock().unwrap().is_empty());
    assert!(notifier.downs.lock().unwrap().is_empty());
}

/// 監視ループが周期的にプローブし、遷移を1回だけ通知する
#[tokio::test]
async fn monitor_loop_detects_recovery_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("services.json");

    let registry = ServiceRegistry::new(Arc::new(JsonStore::new(&path)))
        .await
        .expect("registry");
    registry
        .add(ServiceRecord::new("svc1", server.uri()))
        .await
        .expect("add");

    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = HealthMonitor::new(registry.clone(), notifier.clone()).with_interval(1);
    monitor.start();

    // 少なくとも2周期分待つ
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let record = registry.get("svc1").await.expect("record");
    assert!(record.is_up);
    // 最初の周期でup遷移、以降の周期は状態一致でサイレント
    assert_eq!(*notifier.ups.lock().unwrap(), vec!["svc1"]);
    assert!(notifier.downs.lock().unwrap().is_empty());
}

/// 間隔0で起動しても監視ループは生き続ける（下限へクランプ）
#[tokio::test]
async fn zero_interval_monitor_keeps_ticking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("services.json");

    let registry = ServiceRegistry::new(Arc::new(JsonStore::new(&path)))
        .await
        .expect("registry");
    registry
        .add(ServiceRecord::new("svc1", server.uri()))
        .await
        .expect("add");

    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = HealthMonitor::new(registry.clone(), notifier.clone()).with_interval(0);
    monitor.start();

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let record = registry.get("svc1").await.expect("record");
    assert!(record.is_up, "monitor never probed");
    assert_eq!(*notifier.ups.lock().unwrap(), vec!["svc1"]);
}

/// 応答のないサービスを含む周期でも他のサービスのプローブは進む
#[tokio::test]
async fn unreachable_service_does_not_block_others() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("services.json");

    let registry = ServiceRegistry::new(Arc::new(JsonStore::new(&path)))
        .await
        .expect("registry");
    registry
        .add(ServiceRecord::new("dead", "http://127.0.0.1:1"))
        .await
        .expect("add");
    registry
        .add(ServiceRecord::new("alive", healthy.uri()))
        .await
        .expect("add");

    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = HealthMonitor::new(registry.clone(), notifier.clone());

    monitor.run_cycle().await;

    // プローブタスクはjoinされないため完了を待つ
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(registry.get("alive").await.expect("record").is_up);
    assert!(!registry.get("dead").await.expect("record").is_up);
    assert_eq!(*notifier.ups.lock().unwrap(), vec!["alive"]);
}
