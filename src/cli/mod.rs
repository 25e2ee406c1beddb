//! CLI module for healthwatch
//!
//! Provides command-line interface for the health monitoring daemon and
//! operator subcommands that drive its HTTP API.

pub mod add;
pub mod list;
pub mod remove;
pub mod serve;

use crate::config::get_env_with_fallback_or;
use clap::{Parser, Subcommand};

/// Default server address for client subcommands
pub const DEFAULT_SERVER_ADDR: &str = "http://127.0.0.1:8081";

/// HTTP endpoint health monitor - Probes registered services and notifies on state transitions
#[derive(Parser, Debug)]
#[command(name = "healthwatch")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HEALTHWATCH_HOST            Bind address (default: 0.0.0.0)
    HEALTHWATCH_PORT            Listen port (default: 8081)
    HEALTHWATCH_CHECK_INTERVAL  Probe interval in seconds (default: 60)
    HEALTHWATCH_SERVICES_FILE   State snapshot path (default: ./data/services.json)
    HEALTHWATCH_TG_BOT_TOKEN    Telegram bot token (required for serve)
    HEALTHWATCH_TG_CHAT_ID      Telegram chat id (required for serve)
    HEALTHWATCH_LOG_LEVEL       Log level (default: info)
    HEALTHWATCH_LOG_DIR         Log directory (default: ./logs)
    HEALTHWATCH_ADDR            Server address for client subcommands
                                (default: http://127.0.0.1:8081)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the health monitoring server
    Serve(serve::ServeArgs),
    /// List registered services
    List(list::ListArgs),
    /// Register a service for monitoring
    Add(add::AddArgs),
    /// Remove a service from monitoring
    Remove(remove::RemoveArgs),
}

/// クライアントサブコマンドが接続するサーバーアドレスを解決する
pub fn resolve_server_addr() -> String {
    get_env_with_fallback_or("HEALTHWATCH_ADDR", "CHECKER_ADDR", DEFAULT_SERVER_ADDR)
}
