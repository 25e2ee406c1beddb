//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

use std::path::PathBuf;
use std::time::Duration;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns the default when neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// チェック間隔の下限（秒）
///
/// `tokio::time::interval`は周期0でpanicするため、0は許容しない。
pub const MIN_CHECK_INTERVAL_SECS: u64 = 1;

/// デフォルトの永続化ファイルパス
pub const DEFAULT_SERVICES_FILE: &str = "./data/services.json";

/// 監視ループの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// プローブ周期
    pub check_interval: Duration,
    /// 永続化スナップショットのファイルパス
    pub services_file: PathBuf,
}

impl MonitorConfig {
    /// Load monitor configuration from environment variables.
    pub fn from_env() -> Self {
        let interval_secs: u64 = get_env_with_fallback_parse(
            "HEALTHWATCH_CHECK_INTERVAL",
            "SERVICES_DURATION",
            DEFAULT_CHECK_INTERVAL_SECS,
        );
        if interval_secs < MIN_CHECK_INTERVAL_SECS {
            tracing::warn!(
                requested = interval_secs,
                minimum = MIN_CHECK_INTERVAL_SECS,
                "Check interval below minimum, clamping"
            );
        }
        let interval_secs = interval_secs.max(MIN_CHECK_INTERVAL_SECS);
        let services_file = get_env_with_fallback_or(
            "HEALTHWATCH_SERVICES_FILE",
            "SERVICES_FILE",
            DEFAULT_SERVICES_FILE,
        );

        Self {
            check_interval: Duration::from_secs(interval_secs),
            services_file: PathBuf::from(services_file),
        }
    }
}
