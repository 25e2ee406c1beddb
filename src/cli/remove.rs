//! remove subcommand
//!
//! Removes a registered service from a running server.

use crate::cli::resolve_server_addr;
use anyhow::Context;
use clap::Args;
use reqwest::StatusCode;
use serde_json::json;

/// Arguments for the remove subcommand
#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// Name of the service to remove
    #[arg(short, long)]
    pub name: String,
}

/// Execute the remove command
pub async fn execute(args: &RemoveArgs) -> Result<(), anyhow::Error> {
    let addr = resolve_server_addr();
    let endpoint = format!("{}/services", addr);

    let client = reqwest::Client::new();
    let response = client
        .delete(&endpoint)
        .json(&json!({ "Name": args.name }))
        .send()
        .await
        .with_context(|| format!("Failed to reach server at {}", addr))?;

    match response.status() {
        StatusCode::NO_CONTENT => {
            println!("Removed service {}", args.name);
            Ok(())
        }
        StatusCode::NOT_FOUND => {
            anyhow::bail!("No service named {} is registered", args.name)
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Server returned {}: {}", status, body)
        }
    }
}
