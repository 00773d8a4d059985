//! Adapter error types.
//!
//! The tracker's own error text is carried verbatim so callers see exactly
//! what Jira said.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum JiraError {
    #[error("Jira API error ({status}): {message}")]
    #[diagnostic(code(jira_mcp::jira::api_error))]
    Api { status: u16, message: String },

    #[error("Failed to reach Jira: {0}")]
    #[diagnostic(
        code(jira_mcp::jira::transport),
        help("Check JIRA_HOST and network connectivity.")
    )]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response from Jira: {message}")]
    #[diagnostic(code(jira_mcp::jira::invalid_response))]
    InvalidResponse { message: String },

    #[error("Invalid Jira request: {message}")]
    #[diagnostic(code(jira_mcp::jira::invalid_request))]
    InvalidRequest { message: String },

    #[error("Failed to read staged attachment: {0}")]
    #[diagnostic(code(jira_mcp::jira::staged_file))]
    StagedFile(#[source] std::io::Error),

    #[error("No user found with email: {email}")]
    #[diagnostic(code(jira_mcp::jira::user_not_found))]
    UserNotFound { email: String },

    #[error("Transition '{name}' not found. Available transitions: [{}]", .available.join(", "))]
    #[diagnostic(code(jira_mcp::jira::transition_not_found))]
    TransitionNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Jira accepted the attachment upload but returned no attachment")]
    #[diagnostic(code(jira_mcp::jira::empty_attachment_response))]
    EmptyAttachmentResponse,
}

impl From<reqwest::Error> for JiraError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            JiraError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            JiraError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(e: serde_json::Error) -> Self {
        JiraError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type JiraResult<T> = Result<T, JiraError>;
