//! ロギング初期化
//!
//! 標準出力と日次ローテーションのログファイルへ同時に出力する。
//! ログディレクトリが作成できない場合は標準出力のみへ縮退する（panicしない）。

use crate::config::get_env_with_fallback_or;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// デフォルトのログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// デフォルトのログディレクトリ
const DEFAULT_LOG_DIR: &str = "./logs";

/// ログファイル名（日次ローテーションの接頭辞）
const LOG_FILE_NAME: &str = "healthwatch.log";

/// 環境変数からロギングを初期化する
///
/// 返される`WorkerGuard`はプロセス終了までドロップしてはならない。
/// ドロップするとバッファ済みのログ行が失われる。
pub fn init() -> Option<WorkerGuard> {
    let log_level = get_env_with_fallback_or(
        "HEALTHWATCH_LOG_LEVEL",
        "CHECKER_LOG_LEVEL",
        DEFAULT_LOG_LEVEL,
    );
    let log_dir = get_env_with_fallback_or("HEALTHWATCH_LOG_DIR", "CHECKER_LOG_DIR", DEFAULT_LOG_DIR);

    init_with(&log_level, Path::new(&log_dir))
}

/// 指定されたレベル・ディレクトリでロギングを初期化する
pub fn init_with(log_level: &str, log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "warn: could not create log directory '{}': {e} - falling back to stdout",
            log_dir.display()
        );
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .compact()
            .init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(fmt::layer().compact())
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Some(guard)
}
