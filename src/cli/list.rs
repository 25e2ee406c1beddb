//! list subcommand
//!
//! Fetches the registered services from a running server and prints them.

use crate::cli::resolve_server_addr;
use crate::common::ServiceRecord;
use anyhow::Context;
use clap::Args;

/// Arguments for the list subcommand
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Print raw JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Execute the list command
pub async fn execute(args: &ListArgs) -> Result<(), anyhow::Error> {
    let addr = resolve_server_addr();
    let url = format!("{}/services", addr);

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach server at {}", addr))?;

    if !response.status().is_success() {
        anyhow::bail!("Server returned {}", response.status());
    }

    let services: Vec<ServiceRecord> = response
        .json()
        .await
        .context("Failed to parse server response")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    if services.is_empty() {
        println!("No services registered");
        return Ok(());
    }

    println!("NAME\tSTATUS\tLAST DOWN\tURL");
    for service in &services {
        let status = if service.is_up { "UP" } else { "DOWN" };
        let last_down = service
            .last_down
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}\t{}\t{}\t{}",
            service.name, status, last_down, service.url
        );
    }

    Ok(())
}
