// SPDX-License-Identifier: MIT

//! `fmcp`: minimal observer/control CLI for the folder-mcp daemon (§6.6).
//! A thin WebSocket client — it owns no daemon state and no indexing logic.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::DaemonClient;
use fmcp_wire::ClientMessage;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fmcp", about = "Observe and control a running folder-mcp daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current FMDM snapshot once and exit.
    Status,
    /// Stream `fmdm.update` events until interrupted.
    Watch,
    /// Start monitoring a folder with the given embedding model.
    Add { path: PathBuf, model: String },
    /// Stop monitoring a folder.
    Remove { path: PathBuf },
    /// Check whether a path could be added, without adding it.
    Validate { path: PathBuf },
    /// Retry a folder currently in the `error` state.
    Retry { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Status => status().await,
        Command::Watch => watch().await,
        Command::Add { path, model } => add(path, model).await,
        Command::Remove { path } => remove(path).await,
        Command::Validate { path } => validate(path).await,
        Command::Retry { path } => retry(path).await,
    }
}

async fn status() -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    let fmdm = client.next_update().await?;
    println!("{}", serde_json::to_string_pretty(&fmdm)?);
    Ok(())
}

async fn watch() -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    loop {
        let fmdm = client.next_update().await?;
        println!("{}", serde_json::to_string_pretty(&fmdm)?);
    }
}

async fn add(path: PathBuf, model: String) -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    let response = client.request(ClientMessage::FolderAdd { id: "1".to_string(), path, model }).await?;
    print_response(response)
}

async fn remove(path: PathBuf) -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    let response = client.request(ClientMessage::FolderRemove { id: "1".to_string(), path }).await?;
    print_response(response)
}

async fn validate(path: PathBuf) -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    let response = client.request(ClientMessage::FolderValidate { id: "1".to_string(), path }).await?;
    print_response(response)
}

async fn retry(path: PathBuf) -> Result<()> {
    let mut client = DaemonClient::connect().await?;
    let response = client.request(ClientMessage::FolderRetry { id: "1".to_string(), path }).await?;
    print_response(response)
}

fn print_response(response: fmcp_wire::ServerMessage) -> Result<()> {
    if let fmcp_wire::ServerMessage::Response { data, error, .. } = response {
        match (data, error) {
            (_, Some(error)) => {
                eprintln!("error ({}): {}", error.kind, error.message);
                std::process::exit(1);
            }
            (Some(data), None) => println!("{}", serde_json::to_string_pretty(&data)?),
            (None, None) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
