//! 永続化層
//!
//! サービス状態のスナップショット永続化を抽象化するRepository traitと、
//! JSONファイルバックエンドの実装。

use crate::common::{ServiceRecord, WatchResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

/// サービス永続化のRepository trait
///
/// レジストリはこのtrait経由でのみ永続化にアクセスする。
/// バックエンドの差し替え（テスト用インメモリ実装等）を可能にする。
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// 永続化されたスナップショットを読み込む
    ///
    /// バックエンドが未初期化（ファイル未作成）の場合は空のマップを返す。
    async fn load(&self) -> WatchResult<HashMap<String, ServiceRecord>>;

    /// スナップショット全体を永続化する
    async fn save(&self, services: &HashMap<String, ServiceRecord>) -> WatchResult<()>;
}

/// JSONファイルバックエンドのストア
///
/// スナップショット全体を1つのJSONドキュメント（サービス名→レコードの
/// マッピング）として保存する。書き込みは同一ディレクトリ内の一時ファイルに
/// 行い、アトミックなrenameでコミットするため、クラッシュしても直前の有効な
/// スナップショットが残る。
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// 指定パスのストアを作成（ファイルは初回save時に作成される）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// renameコミット前に書き込む一時ファイルのパス
    fn tmp_path(&self) -> PathBuf {
        let mut raw = self.path.clone().into_os_string();
        raw.push(".tmp");
        PathBuf::from(raw)
    }
}

#[async_trait]
impl ServiceRepository for JsonStore {
    async fn load(&self) -> WatchResult<HashMap<String, ServiceRecord>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "State file not found, starting empty");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let services = serde_json::from_slice(&data)?;
        Ok(services)
    }

    async fn save(&self, services: &HashMap<String, ServiceRecord>) -> WatchResult<()> {
        let data = serde_json::to_vec_pretty(services)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        // 一時ファイルに書いてからrename。renameがアトミックなコミットポイントで、
        // 読み手が書きかけのファイルを観測することはない。
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), count = services.len(), "Saved service snapshot");
        Ok(())
    }
}

/// インメモリストア
///
/// プロセス終了で状態が失われる代替バックエンド。テストや一時的な実行向け。
#[derive(Default)]
pub struct MemoryStore {
    services: Mutex<HashMap<String, ServiceRecord>>,
}

impl MemoryStore {
    /// 空のインメモリストアを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn load(&self) -> WatchResult<HashMap<String, ServiceRecord>> {
        Ok(self.services.lock().await.clone())
    }

    async fn save(&self, services: &HashMap<String, ServiceRecord>) -> WatchResult<()> {
        *self.services.lock().await = services.clone();
        Ok(())
    }
}
