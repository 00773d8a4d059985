//! MCP server implementation
//!
//! Bridges the protocol layer to the [`Dispatcher`]. The catalog is advertised
//! through `tools/list`; `tools/call` requests are dispatched and their
//! [`ToolResult`] rendered as a single text content block.

use std::sync::Arc;

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};

use crate::jira::JiraClient;

use super::dispatch::{Dispatcher, ToolCall, ToolResult};

const INSTRUCTIONS: &str = "Jira MCP Server - Create, read, update and delete issues, \
     comment with attachments, search with JQL, transition issues, and manage boards and sprints";

/// MCP server over a Jira client.
///
/// Generic over `C: JiraClient` for zero-cost abstraction (no dynamic dispatch).
pub struct JiraMcpServer<C: JiraClient> {
    dispatcher: Dispatcher<C>,
}

impl<C: JiraClient> Clone for JiraMcpServer<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<C: JiraClient> JiraMcpServer<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            dispatcher: Dispatcher::new(client),
        }
    }

    /// Catalog rendered as protocol tool descriptors.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .tools()
            .iter()
            .map(|def| Tool::new(def.name(), def.description, def.input_schema()))
            .collect()
    }

    /// Dispatch a call and render the outcome.
    pub async fn call(&self, call: ToolCall) -> CallToolResult {
        self.dispatcher.dispatch(call).await.into()
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        match result {
            ToolResult::Success(payload) => {
                let text = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string());
                CallToolResult::success(vec![Content::text(text)])
            }
            ToolResult::Error { message } => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

impl<C: JiraClient + 'static> ServerHandler for JiraMcpServer<C> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let call = ToolCall::new(request.name, request.arguments.unwrap_or_default());
        Ok(self.call(call).await)
    }
}
