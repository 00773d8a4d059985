//! Jira MCP server binary.
//!
//! This binary reads the Jira credentials, creates the concrete REST client
//! and passes it to the server. The MCP layer remains agnostic of how the
//! tracker is reached.

use std::net::IpAddr;

use clap::Parser;
use jira_mcp::app::{self, AppError, Config, Transport};
use jira_mcp::config::{ConfigError, JiraConfig};
use jira_mcp::jira::{JiraError, JiraRestClient};
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create Jira client: {0}")]
    #[diagnostic(code(jira_mcp::binary::client))]
    Jira(#[from] JiraError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    App(#[from] AppError),
}

#[derive(Parser)]
#[command(name = "jira-mcp")]
#[command(author, version, about = "MCP server for Jira", long_about = None)]
struct Cli {
    /// Transport to serve MCP on
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    app::init_tracing();

    let _ = rustls::crypto::ring::default_provider().install_default();

    run(cli).await.map_err(miette::Report::new)
}

async fn run(cli: Cli) -> Result<(), BinaryError> {
    let config = JiraConfig::from_env()?;
    info!(host = %config.base_url, "Using Jira instance");

    let client = JiraRestClient::new(&config)?;

    app::run(
        Config {
            transport: cli.transport,
            host: cli.host,
            port: cli.port,
        },
        client,
    )
    .await?;

    Ok(())
}
