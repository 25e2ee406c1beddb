//! 状態遷移通知
//!
//! up/down遷移を外部メッセージングAPI（Telegram）へ通知する。
//! 通知はfire-and-forgetであり、失敗してもヘルスチェックサイクルを
//! 妨げない（ログのみ）。

use crate::common::{ServiceRecord, WatchError, WatchResult};
use crate::config::get_env_with_fallback;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

/// 通知送信のタイムアウト（秒）
const SEND_TIMEOUT_SECS: u64 = 10;

/// Telegram Bot APIのベースURL
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 状態遷移通知の送信先インターフェース
///
/// 両メソッドともベストエフォート。失敗は実装側でログに記録して握り潰し、
/// 呼び出し元へは伝播させない。
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// ダウン遷移を通知
    async fn notify_down(&self, record: &ServiceRecord);

    /// 復旧遷移を通知
    async fn notify_up(&self, record: &ServiceRecord);
}

/// Telegram通知実装
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    api_base: String,
    client: Client,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // トークンはログやテスト出力に露出させない
        f.debug_struct("TelegramNotifier")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl TelegramNotifier {
    /// トークンとチャットIDから通知クライアントを作成
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
            client,
        }
    }

    /// 環境変数から通知クライアントを作成
    ///
    /// 認証情報が未設定の場合は設定エラーを返す（起動時に致命的）。
    pub fn from_env() -> WatchResult<Self> {
        let token = get_env_with_fallback("HEALTHWATCH_TG_BOT_TOKEN", "TG_BOT_TOKEN")
            .ok_or_else(|| WatchError::Config("HEALTHWATCH_TG_BOT_TOKEN must be set".into()))?;
        let chat_id = get_env_with_fallback("HEALTHWATCH_TG_CHAT_ID", "TG_CHAT_ID")
            .ok_or_else(|| WatchError::Config("HEALTHWATCH_TG_CHAT_ID must be set".into()))?;

        Ok(Self::new(token, chat_id))
    }

    /// APIベースURLを差し替える（テスト用モックサーバー向け）
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// サーバー起動をアナウンスする
    pub async fn announce_startup(&self) {
        self.send_message(&format!(
            "healthwatch v{} started",
            env!("CARGO_PKG_VERSION")
        ))
        .await;
    }

    async fn send_message(&self, text: &str) {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let result = self
            .client
            .get(&url)
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await;

        match result {
            Ok(resp) if resp.status() == StatusCode::OK => {}
            Ok(resp) => {
                warn!(status = %resp.status(), "Telegram returned non-200 status");
            }
            Err(e) => {
                warn!(error = %e, "Failed to send Telegram message");
            }
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn notify_down(&self, record: &ServiceRecord) {
        self.send_message(&format!("⚠️ Service {} is down", record.name))
            .await;
        info!(service = %record.name, "Sent down notification");
    }

    async fn notify_up(&self, record: &ServiceRecord) {
        self.send_message(&format!("✅ Service {} has recovered", record.name))
            .await;
        info!(service = %record.name, "Sent recovery notification");
    }
}
