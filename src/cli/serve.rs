//! serve サブコマンド
//!
//! ヘルスチェック監視サーバーを起動します。

use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8081", env = "HEALTHWATCH_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HEALTHWATCH_HOST")]
    pub host: String,
}
