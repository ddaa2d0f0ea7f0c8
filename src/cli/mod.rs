// CLI commands for the sandbox
//
// `serve` runs the daemon; the other subcommands are thin HTTP clients
// for manual inspection of a running daemon.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use crate::client::SandboxClient;
use crate::config::constants::{DEFAULT_BASE_URL, DEFAULT_HISTORY_LIMIT};
use crate::config::load_config;
use crate::sandbox::{ResourceLimits, SandboxRequest};
use crate::server::SandboxServer;

#[derive(Debug, Parser)]
#[command(name = "toolbox", about = "Agent tool sandbox", version)]
pub struct Cli {
    /// Base URL of the sandbox daemon (client subcommands)
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the sandbox HTTP daemon
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Check daemon health
    Health,
    /// List registered tools
    Tools,
    /// Register a tool by name (echo implementation)
    Register {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Execute a tool
    Exec {
        name: String,
        /// Tool input as a JSON object
        #[arg(long, default_value = "{}")]
        input: String,
        /// Duration ceiling in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Show recent execution history
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { bind } => {
            let mut config = load_config()?;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            SandboxServer::new(config)?.serve().await
        }
        Command::Health => {
            let client = SandboxClient::new(cli.url);
            let health = client.health().await?;
            println!("✓ Sandbox is healthy");
            println!(
                "  Tools registered: {}",
                health["tools_registered"].as_u64().unwrap_or(0)
            );
            Ok(())
        }
        Command::Tools => {
            let client = SandboxClient::new(cli.url);
            let tools = client.list_tools().await?;
            if tools.is_empty() {
                println!("No tools registered");
            } else {
                println!("Registered tools:");
                for tool in tools {
                    println!("  {}", tool);
                }
            }
            Ok(())
        }
        Command::Register { name, description } => {
            let client = SandboxClient::new(cli.url);
            let resp = client.register_tool(&name, &description).await?;
            println!(
                "✓ Registered '{}' ({} tools total)",
                name,
                resp["total_tools"].as_u64().unwrap_or(0)
            );
            Ok(())
        }
        Command::Exec {
            name,
            input,
            timeout_ms,
        } => {
            let client = SandboxClient::new(cli.url);
            let request = build_request(&name, &input, timeout_ms)?;
            let result = client.execute(&request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::History { limit } => {
            let client = SandboxClient::new(cli.url);
            let entries = client.history(limit).await?;
            if entries.is_empty() {
                println!("No executions recorded");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}  {:<10} {:<20} {:>8.1}ms  {}",
                    entry.request_id,
                    format!("{:?}", entry.status).to_lowercase(),
                    entry.tool_name,
                    entry.duration_ms,
                    entry.error.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
    }
}

fn build_request(name: &str, input: &str, timeout_ms: Option<u64>) -> Result<SandboxRequest> {
    let tool_input: Map<String, Value> =
        serde_json::from_str(input).context("--input must be a JSON object")?;
    let mut request = SandboxRequest::new(name).with_input(tool_input);
    if let Some(timeout_ms) = timeout_ms {
        request.limits = ResourceLimits {
            max_duration_ms: timeout_ms,
            ..Default::default()
        };
    }
    Ok(request)
}
