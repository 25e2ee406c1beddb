//! add subcommand
//!
//! Registers a new service with a running server.

use crate::cli::resolve_server_addr;
use anyhow::Context;
use clap::Args;
use reqwest::StatusCode;
use serde_json::json;

/// Arguments for the add subcommand
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Service name (unique key, re-adding overwrites)
    #[arg(short, long)]
    pub name: String,

    /// URL to probe
    #[arg(short, long)]
    pub url: String,
}

/// Execute the add command
pub async fn execute(args: &AddArgs) -> Result<(), anyhow::Error> {
    let addr = resolve_server_addr();
    let endpoint = format!("{}/services", addr);

    let client = reqwest::Client::new();
    let response = client
        .post(&endpoint)
        .json(&json!({ "Name": args.name, "URL": args.url }))
        .send()
        .await
        .with_context(|| format!("Failed to reach server at {}", addr))?;

    match response.status() {
        StatusCode::CREATED => {
            println!("Added service {} ({})", args.name, args.url);
            Ok(())
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Server returned {}: {}", status, body)
        }
    }
}
