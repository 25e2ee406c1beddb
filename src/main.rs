//! healthwatch Server Entry Point

use clap::Parser;
use healthwatch::cli::{Cli, Commands};
use healthwatch::config::MonitorConfig;
use healthwatch::notify::{NotificationSink, TelegramNotifier};
use healthwatch::registry::ServiceRegistry;
use healthwatch::storage::JsonStore;
use healthwatch::{health, logging, server, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_args(host: String, port: u16) -> Self {
        Self { host, port }
    }

    fn from_env() -> Self {
        let host =
            healthwatch::config::get_env_with_fallback_or("HEALTHWATCH_HOST", "CHECKER_HOST", "0.0.0.0");
        let port =
            healthwatch::config::get_env_with_fallback_parse("HEALTHWATCH_PORT", "CHECKER_PORT", 8081);
        Self { host, port }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List(args)) => {
            if let Err(e) = healthwatch::cli::list::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Add(args)) => {
            if let Err(e) = healthwatch::cli::add::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Remove(args)) => {
            if let Err(e) = healthwatch::cli::remove::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve(args)) => {
            let _guard = logging::init();
            let config = ServerConfig::from_args(args.host, args.port);
            run_server(config).await;
        }
        None => {
            // No subcommand - default to serve
            let _guard = logging::init();
            let config = ServerConfig::from_env();
            run_server(config).await;
        }
    }
}

async fn run_server(config: ServerConfig) {
    info!("healthwatch v{}", env!("CARGO_PKG_VERSION"));

    let monitor_config = MonitorConfig::from_env();

    // 永続化スナップショットを読み込む（破損は起動時に致命的）
    let store = Arc::new(JsonStore::new(&monitor_config.services_file));
    let registry = match ServiceRegistry::new(store).await {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!(
                "Error: failed to load service snapshot from {}: {}",
                monitor_config.services_file.display(),
                e
            );
            std::process::exit(1);
        }
    };

    // 通知クライアント（認証情報欠落は起動時に致命的）
    let notifier = match TelegramNotifier::from_env() {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    notifier.announce_startup().await;

    // ヘルスモニターをバックグラウンドで開始
    let sink: Arc<dyn NotificationSink> = notifier;
    health::HealthMonitor::new(registry.clone(), sink)
        .with_interval(monitor_config.check_interval.as_secs())
        .start();

    let state = AppState { registry };

    server::run(state, &config.bind_addr()).await;
}
