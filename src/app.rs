//! Process wiring: tracing, transport selection and the HTTP listener.

use std::net::IpAddr;

use axum::Router;
use clap::ValueEnum;
use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::jira::JiraClient;
use crate::mcp::{create_mcp_service, serve_stdio};

/// Path the Streamable HTTP service is mounted on.
pub const MCP_PATH: &str = "/mcp";

#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(jira_mcp::app::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(jira_mcp::app::serve))]
    Serve(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Transport {
    /// One session over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP on `host:port` at /mcp
    Http,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    /// Host address to bind to (HTTP only)
    pub host: IpAddr,
    /// Port to listen on (HTTP only)
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
        }
    }
}

/// Initialize tracing subscriber with env filter.
///
/// Logs go to stderr: stdout belongs to the stdio transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jira_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Router with the MCP service nested at [`MCP_PATH`].
pub fn router<C: JiraClient + 'static>(client: C, cancellation_token: CancellationToken) -> Router {
    Router::new()
        .nest_service(MCP_PATH, create_mcp_service(client, cancellation_token))
        .layer(TraceLayer::new_for_http())
}

/// Run the server on the configured transport until it finishes or Ctrl-C.
pub async fn run<C: JiraClient + 'static>(config: Config, client: C) -> Result<(), AppError> {
    match config.transport {
        Transport::Stdio => serve_stdio(client).await.map_err(AppError::Serve),
        Transport::Http => serve_http(&config, client).await,
    }
}

async fn serve_http<C: JiraClient + 'static>(config: &Config, client: C) -> Result<(), AppError> {
    let ct = CancellationToken::new();
    let app = router(client, ct.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("MCP server listening on http://{}{}", addr, MCP_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // If the signal handler cannot be installed, stop right away
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            ct.cancel();
        })
        .await
        .map_err(AppError::Serve)
}
