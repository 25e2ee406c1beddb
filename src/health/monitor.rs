//! サービスヘルスモニター
//!
//! 固定周期のタイマーで全登録サービスにプローブを送り、up/down遷移を検出する。

use crate::common::ServiceRecord;
use crate::notify::NotificationSink;
use crate::registry::ServiceRegistry;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

/// プローブのタイムアウト（秒）
///
/// 無制限のHTTPクライアントはプローブタスクの無限蓄積を招くため、
/// 必ず有限のタイムアウトを課す。
const PROBE_TIMEOUT_SECS: u64 = 10;

/// サービスヘルスモニター
///
/// 周期ごとにレジストリのスナップショットを取り、サービス1件につき独立した
/// 並行プローブタスクを起動する。タスクは次の周期を待たずに実行され続けるため、
/// 応答の遅いサービスのプローブは周期をまたいで重なり得る（同一レコードへの
/// 競合書き込みはlast-write-wins）。
#[derive(Clone)]
pub struct HealthMonitor {
    /// サービスレジストリ
    registry: ServiceRegistry,
    /// 遷移通知の送信先
    notifier: Arc<dyn NotificationSink>,
    /// HTTPクライアント（タイムアウト付き）
    client: Client,
    /// チェック間隔（秒）
    check_interval_secs: u64,
}

impl HealthMonitor {
    /// 新しいヘルスモニターを作成
    pub fn new(registry: ServiceRegistry, notifier: Arc<dyn NotificationSink>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            registry,
            notifier,
            client,
            check_interval_secs: crate::config::DEFAULT_CHECK_INTERVAL_SECS,
        }
    }

    /// チェック間隔を設定
    ///
    /// 周期0は`tokio::time::interval`のpanicで監視タスクを黙殺するため、
    /// 下限へクランプする。
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.check_interval_secs = interval_secs.max(crate::config::MIN_CHECK_INTERVAL_SECS);
        self
    }

    /// バックグラウンドで監視を開始
    pub fn start(self) {
        tokio::spawn(async move {
            self.monitor_loop().await;
        });
    }

    /// 監視ループ
    ///
    /// プローブや通知の失敗でループが止まることはない。
    async fn monitor_loop(&self) {
        let mut timer = interval(Duration::from_secs(self.check_interval_secs));

        info!(
            interval_secs = self.check_interval_secs,
            "Health monitor started"
        );

        loop {
            timer.tick().await;
            self.run_cycle().await;
        }
    }

    /// 1周期分のプローブを起動する
    ///
    /// スナップショット中の各サービスに対してタスクを起動するだけで、
    /// 完了は待たない（joinしない）。
    pub async fn run_cycle(&self) {
        let services = self.registry.get_all().await;

        if services.is_empty() {
            debug!("No services to check");
            return;
        }

        debug!(count = services.len(), "Starting probe cycle");

        for record in services {
            let monitor = self.clone();
            tokio::spawn(async move {
                monitor.check_service(record).await;
            });
        }
    }

    /// 単一サービスのプローブと遷移判定
    ///
    /// 到達可能 = HTTP呼び出しが成功し、ステータスコードが500未満。
    /// ネットワークエラーや5xxは到達不能、4xxは到達可能（エンドポイントは
    /// 応答している）。プローブ結果が保存済み状態と一致する場合は
    /// 書き込みも通知も行わない。
    pub async fn check_service(&self, mut record: ServiceRecord) {
        debug!(service = %record.name, url = %record.url, "Probing service");

        let result = self.client.get(&record.url).send().await;
        let reachable = matches!(&result, Ok(resp) if resp.status().as_u16() < 500);

        match (record.is_up, reachable) {
            (true, false) => {
                record.is_up = false;
                record.last_down = Some(Utc::now());
                warn!(
                    service = %record.name,
                    url = %record.url,
                    status = %describe_probe(&result),
                    "Service went down"
                );
                self.notifier.notify_down(&record).await;
                self.persist(record).await;
            }
            (false, true) => {
                record.is_up = true;
                info!(
                    service = %record.name,
                    url = %record.url,
                    status = %describe_probe(&result),
                    "Service recovered"
                );
                self.notifier.notify_up(&record).await;
                self.persist(record).await;
            }
            // 状態一致: 定常状態では永続化I/Oを発生させない
            _ => {}
        }
    }

    /// 遷移後のレコードをレジストリ経由で永続化する
    ///
    /// 保存失敗はログに記録して握り潰す。メモリ上の状態は更新済みであり、
    /// ヘルスチェックサイクルは継続する。
    async fn persist(&self, record: ServiceRecord) {
        let name = record.name.clone();
        if let Err(e) = self.registry.add(record).await {
            error!(service = %name, error = %e, "Failed to persist service state");
        }
    }
}

/// ログ出力用にプローブ結果を整形する
fn describe_probe(result: &Result<reqwest::Response, reqwest::Error>) -> String {
    match result {
        Ok(resp) => resp.status().to_string(),
        Err(_) => "no response".to_string(),
    }
}
