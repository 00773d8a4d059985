//! Dispatch errors and the error envelope.
//!
//! Every failure a tool call can hit ends up here and is rendered into the
//! same `Operation failed: <cause>` text result. Callers branch on the error
//! flag only; the text is for humans.

use miette::Diagnostic;
use thiserror::Error;

use crate::jira::JiraError;

use super::dispatch::ToolResult;

/// Prefix of every error envelope message.
pub const ERROR_PREFIX: &str = "Operation failed: ";

#[derive(Error, Diagnostic, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {name}")]
    #[diagnostic(code(jira_mcp::mcp::unknown_tool))]
    UnknownTool { name: String },

    #[error("Missing required argument: {field}")]
    #[diagnostic(code(jira_mcp::mcp::missing_argument))]
    MissingArgument { field: &'static str },

    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(jira_mcp::mcp::invalid_arguments))]
    InvalidArguments { message: String },

    #[error("Invalid base64 attachment content: {0}")]
    #[diagnostic(code(jira_mcp::mcp::decode))]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to stage attachment: {0}")]
    #[diagnostic(code(jira_mcp::mcp::staging))]
    Staging(#[source] std::io::Error),

    #[error("Internal error: {message}")]
    #[diagnostic(code(jira_mcp::mcp::internal))]
    Internal { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Adapter(#[from] JiraError),
}

impl DispatchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DispatchError::InvalidArguments {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::invalid(e.to_string())
    }
}

/// Build the error envelope for a failed call.
pub fn wrap(error: &DispatchError) -> ToolResult {
    ToolResult::Error {
        message: format!("{ERROR_PREFIX}{error}"),
    }
}

impl From<DispatchError> for ToolResult {
    fn from(error: DispatchError) -> Self {
        wrap(&error)
    }
}
