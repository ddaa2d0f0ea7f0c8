// Toolbox - Policy-driven execution sandbox for agent tool calls
// Main entry point

use anyhow::Result;
use clap::Parser;

use toolbox::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    toolbox::cli::run(cli).await
}
