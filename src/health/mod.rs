//! ヘルスチェック監視
//!
//! プル型ヘルスチェックで登録済みサービスの稼働状況を監視

pub mod monitor;

pub use monitor::HealthMonitor;
