//! MCP transports
//!
//! The server runs either over stdio (one session on the process's
//! stdin/stdout) or as a Streamable HTTP service nested into an Axum router.

use std::sync::Arc;

use rmcp::{
    ServiceExt,
    transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    },
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::jira::JiraClient;

use super::server::JiraMcpServer;

/// Create MCP Streamable HTTP service
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use jira_mcp::config::JiraConfig;
/// # use jira_mcp::jira::JiraRestClient;
/// # use jira_mcp::mcp::create_mcp_service;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let config = JiraConfig::new("example.atlassian.net", "me@example.com", "token")?;
/// let client = JiraRestClient::new(&config)?;
/// let ct = CancellationToken::new();
///
/// let app: Router = Router::new().nest_service("/mcp", create_mcp_service(client, ct));
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<C: JiraClient + 'static>(
    client: C,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<JiraMcpServer<C>, LocalSessionManager> {
    let client = Arc::new(client);

    // One server per session, all sharing the same client
    let service_factory = move || -> Result<JiraMcpServer<C>, std::io::Error> {
        Ok(JiraMcpServer::new(Arc::clone(&client)))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

/// Serve a single session over stdin/stdout until the peer disconnects.
pub async fn serve_stdio<C: JiraClient + 'static>(client: C) -> Result<(), std::io::Error> {
    let server = JiraMcpServer::new(Arc::new(client));

    info!("Serving MCP over stdio");
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    running
        .waiting()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    info!("MCP stdio session closed");
    Ok(())
}
