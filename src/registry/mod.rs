//! サービスレジストリ
//!
//! サービスの状態をメモリ内で管理し、永続化ストアと同期

use crate::common::{ServiceRecord, WatchResult};
use crate::storage::ServiceRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// サービスレジストリ
///
/// サービス情報をメモリにキャッシュし、全コンポーネントが参照・更新する
/// 唯一の情報源となる。変更は同期的にストアへ書き込まれる（write-through）。
/// メモリ上の状態が実行時の正であり、ファイルは復旧用スナップショット。
#[derive(Clone)]
pub struct ServiceRegistry {
    /// サービスのインメモリキャッシュ
    services: Arc<RwLock<HashMap<String, ServiceRecord>>>,
    /// 永続化バックエンド
    repo: Arc<dyn ServiceRepository>,
}

impl ServiceRegistry {
    /// ストアからレジストリを作成し、永続化済みスナップショットを読み込む
    ///
    /// スナップショットが破損している場合はエラー（起動時は致命的）。
    pub async fn new(repo: Arc<dyn ServiceRepository>) -> WatchResult<Self> {
        let services = repo.load().await?;

        info!(service_count = services.len(), "Loaded services from store");

        Ok(Self {
            services: Arc::new(RwLock::new(services)),
            repo,
        })
    }

    /// サービスを追加（同名レコードは上書き = upsert）
    ///
    /// 排他ロック下で挿入し、スナップショット全体を同期的に保存する。
    /// 保存に失敗してもメモリ上の変更は維持され、エラーは呼び出し元に返る。
    pub async fn add(&self, record: ServiceRecord) -> WatchResult<()> {
        let mut services = self.services.write().await;
        services.insert(record.name.clone(), record);
        self.repo.save(&services).await
    }

    /// サービスを削除
    ///
    /// 存在した場合はtrueを返し、ストアへ書き込む。
    /// 存在しない場合はfalseを返し、保存は行わない。
    pub async fn delete(&self, name: &str) -> WatchResult<bool> {
        let mut services = self.services.write().await;
        if services.remove(name).is_none() {
            return Ok(false);
        }
        self.repo.save(&services).await?;
        Ok(true)
    }

    /// サービスを取得
    pub async fn get(&self, name: &str) -> Option<ServiceRecord> {
        self.services.read().await.get(name).cloned()
    }

    /// 全サービスのスナップショットを取得
    ///
    /// 共有ロック下でのコピーを返す。以降の変更は反映されない。
    pub async fn get_all(&self) -> Vec<ServiceRecord> {
        self.services.read().await.values().cloned().collect()
    }

    /// 登録されているサービス数を取得
    pub async fn count(&self) -> usize {
        self.services.read().await.len()
    }
}
