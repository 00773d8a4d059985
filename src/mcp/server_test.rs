//! Tests for MCP server initialization and tool exposure

use std::sync::Arc;

use rmcp::ServerHandler;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

use crate::mcp::dispatch::{JsonObject, ToolCall, ToolResult};
use crate::mcp::server::JiraMcpServer;
use crate::mcp::testing::{StubJira, board};

fn text_of(result: &CallToolResult) -> &str {
    assert_eq!(result.content.len(), 1);
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

#[test]
fn test_server_info() {
    let server = JiraMcpServer::new(Arc::new(StubJira::new()));

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
}

#[test]
fn test_tools_mirror_catalog() {
    let server = JiraMcpServer::new(Arc::new(StubJira::new()));

    let tools = server.tools();

    assert_eq!(tools.len(), 18);
    let create = tools
        .iter()
        .find(|t| t.name == "create_jira_issue")
        .expect("create_jira_issue advertised");
    let mut required: Vec<&str> = create.input_schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    required.sort_unstable();
    assert_eq!(required, vec!["issueType", "projectKey", "summary"]);
    assert!(
        create
            .description
            .as_deref()
            .is_some_and(|d| d.contains("Create"))
    );
}

#[tokio::test]
async fn test_successful_call_renders_json_text() {
    let server = JiraMcpServer::new(Arc::new(StubJira {
        boards: vec![board(4, "Team")],
        ..StubJira::default()
    }));

    let result = server
        .call(ToolCall::new("get_jira_boards", JsonObject::new()))
        .await;

    assert!(result.is_error.is_none() || result.is_error == Some(false));
    let boards: Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(boards[0]["id"], json!(4));
}

#[tokio::test]
async fn test_failed_call_sets_error_flag() {
    let server = JiraMcpServer::new(Arc::new(StubJira::new()));

    let result = server
        .call(ToolCall::new("get_issue", JsonObject::new()))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result),
        "Operation failed: Missing required argument: issueKey"
    );
}

#[test]
fn test_tool_result_conversion() {
    let ok: CallToolResult = ToolResult::Success(json!({"message": "done"})).into();
    assert_eq!(
        serde_json::from_str::<Value>(text_of(&ok)).unwrap(),
        json!({"message": "done"})
    );

    let err: CallToolResult = ToolResult::Error {
        message: "Operation failed: nope".to_string(),
    }
    .into();
    assert_eq!(err.is_error, Some(true));
    assert_eq!(text_of(&err), "Operation failed: nope");
}
