//! Tool handlers
//!
//! Handlers are grouped by the tracker area they touch:
//! - issues: create, read, update, delete, search, link, transition
//! - comments: comments and comment attachments
//! - metadata: users, fields, issue types, link types
//! - agile: boards and sprints
//!
//! Each handler takes the already validated arguments, deserializes them into
//! its parameter struct, calls the adapter and returns a normalized payload.
//! The same parameter structs derive the advertised input schemas.

pub(super) mod agile;
pub(super) mod comments;
pub(super) mod issues;
pub(super) mod metadata;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::jira::JiraClient;

use super::catalog::ToolName;
use super::dispatch::JsonObject;
use super::error::DispatchError;

/// Run the handler for `tool`.
///
/// The match is exhaustive over [`ToolName`], so every catalog entry has
/// exactly one handler.
pub(crate) async fn route<C: JiraClient>(
    tool: ToolName,
    client: &C,
    arguments: &JsonObject,
) -> Result<Value, DispatchError> {
    match tool {
        ToolName::DeleteIssue => issues::delete_issue(client, parse(arguments)?).await,
        ToolName::CreateIssue => issues::create_issue(client, parse(arguments)?).await,
        ToolName::GetIssue => issues::get_issue(client, parse(arguments)?).await,
        ToolName::CreateIssueLink => issues::create_issue_link(client, parse(arguments)?).await,
        ToolName::UpdateIssue => issues::update_issue(client, parse(arguments)?).await,
        ToolName::SearchIssues => issues::search_issues(client, parse(arguments)?).await,
        ToolName::TransitionIssue => issues::transition_issue(client, parse(arguments)?).await,
        ToolName::AddComment => comments::add_comment(client, parse(arguments)?).await,
        ToolName::AddCommentWithAttachment => {
            comments::add_comment_with_attachment(client, parse(arguments)?).await
        }
        ToolName::GetUser => metadata::get_user(client, parse(arguments)?).await,
        ToolName::ListFields => metadata::list_fields(client).await,
        ToolName::ListIssueTypes => metadata::list_issue_types(client).await,
        ToolName::ListLinkTypes => metadata::list_link_types(client).await,
        ToolName::GetProjectSprints => agile::get_project_sprints(client, parse(arguments)?).await,
        ToolName::GetBoards => agile::get_boards(client, parse(arguments)?).await,
        ToolName::GetBoardSprints => agile::get_board_sprints(client, parse(arguments)?).await,
        ToolName::AddIssuesToSprint => {
            agile::add_issues_to_sprint(client, parse(arguments)?).await
        }
        ToolName::CreateSprint => agile::create_sprint(client, parse(arguments)?).await,
    }
}

/// Deserialize call arguments into a handler's parameter struct.
fn parse<T: DeserializeOwned>(arguments: &JsonObject) -> Result<T, DispatchError> {
    serde_json::from_value(Value::Object(arguments.clone())).map_err(DispatchError::from)
}

/// Treat empty optional strings as not provided.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
