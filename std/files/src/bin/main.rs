//! Binary entry point for the wmcp-files MCP server.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wmcp_files::cli::App;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    match App::parse().run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
