//! healthwatch
//!
//! HTTPエンドポイントの死活監視サービス。
//! 登録されたエンドポイントを定期的にプローブし、up/down状態の遷移を検出して
//! 通知を送信する。状態はJSONスナップショットとして永続化される。

#![warn(missing_docs)]

/// 共通型定義・エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ヘルスチェック監視
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 状態遷移通知（Telegram）
pub mod notify;

/// サービス登録管理
pub mod registry;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// 永続化層（JSONスナップショット）
pub mod storage;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サービスレジストリ
    pub registry: registry::ServiceRegistry,
}
