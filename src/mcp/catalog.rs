//! Tool catalog.
//!
//! The catalog is a static table built at compile time. Every entry is keyed
//! by a [`ToolName`] variant, so the set of names and the set of handlers
//! cannot drift apart. Input schemas are derived from the handlers' parameter
//! structs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rmcp::handler::server::common::{schema_for_empty_input, schema_for_type};

use super::dispatch::JsonObject;
use super::tools::agile::{
    AddIssuesToSprintParams, CreateSprintParams, GetBoardSprintsParams, GetBoardsParams,
    GetProjectSprintsParams,
};
use super::tools::comments::{AddCommentParams, AddCommentWithAttachmentParams};
use super::tools::issues::{
    CreateIssueLinkParams, CreateIssueParams, DeleteIssueParams, GetIssueParams,
    SearchIssuesParams, TransitionIssueParams, UpdateIssueParams,
};
use super::tools::metadata::GetUserParams;

/// Identifier of every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    DeleteIssue,
    CreateIssue,
    GetIssue,
    CreateIssueLink,
    UpdateIssue,
    GetUser,
    ListFields,
    ListIssueTypes,
    ListLinkTypes,
    SearchIssues,
    AddComment,
    AddCommentWithAttachment,
    GetProjectSprints,
    TransitionIssue,
    GetBoards,
    GetBoardSprints,
    AddIssuesToSprint,
    CreateSprint,
}

impl ToolName {
    pub const fn as_str(self) -> &'static str {
        match self {
            ToolName::DeleteIssue => "delete_issue",
            ToolName::CreateIssue => "create_jira_issue",
            ToolName::GetIssue => "get_issue",
            ToolName::CreateIssueLink => "create_issue_link",
            ToolName::UpdateIssue => "update_issue",
            ToolName::GetUser => "get_user",
            ToolName::ListFields => "list_fields",
            ToolName::ListIssueTypes => "list_issue_types",
            ToolName::ListLinkTypes => "list_link_types",
            ToolName::SearchIssues => "search_issues",
            ToolName::AddComment => "add_comment",
            ToolName::AddCommentWithAttachment => "add_comment_with_attachment",
            ToolName::GetProjectSprints => "get_project_sprints",
            ToolName::TransitionIssue => "transition_issue",
            ToolName::GetBoards => "get_jira_boards",
            ToolName::GetBoardSprints => "get_board_sprints",
            ToolName::AddIssuesToSprint => "add_issues_to_sprint",
            ToolName::CreateSprint => "create_sprint",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(s).map(|def| def.tool).ok_or(())
    }
}

/// A callable tool: name, description, required arguments and input schema.
#[derive(Debug, Clone, Copy)]
pub struct ToolDefinition {
    pub tool: ToolName,
    pub description: &'static str,
    /// Required arguments in the order they are checked.
    pub required: &'static [&'static str],
    schema: fn() -> Arc<JsonObject>,
}

impl ToolDefinition {
    pub fn name(&self) -> &'static str {
        self.tool.as_str()
    }

    /// Required arguments in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + use<> {
        self.required.iter().copied()
    }

    /// JSON Schema of the tool's arguments.
    pub fn input_schema(&self) -> Arc<JsonObject> {
        (self.schema)()
    }
}

static CATALOG: &[ToolDefinition] = &[
    ToolDefinition {
        tool: ToolName::DeleteIssue,
        description: "Delete a Jira issue or subtask",
        required: &["issueKey"],
        schema: schema_for_type::<DeleteIssueParams>,
    },
    ToolDefinition {
        tool: ToolName::CreateIssue,
        description: "Create a new Jira issue",
        required: &["projectKey", "summary", "issueType"],
        schema: schema_for_type::<CreateIssueParams>,
    },
    ToolDefinition {
        tool: ToolName::GetIssue,
        description: "Get complete issue details including comments and attachments",
        required: &["issueKey"],
        schema: schema_for_type::<GetIssueParams>,
    },
    ToolDefinition {
        tool: ToolName::CreateIssueLink,
        description: "Create a link between two issues",
        required: &["inwardIssueKey", "outwardIssueKey", "linkType"],
        schema: schema_for_type::<CreateIssueLinkParams>,
    },
    ToolDefinition {
        tool: ToolName::UpdateIssue,
        description: "Update an existing Jira issue",
        required: &["issueKey"],
        schema: schema_for_type::<UpdateIssueParams>,
    },
    ToolDefinition {
        tool: ToolName::GetUser,
        description: "Get a user's account ID by email address",
        required: &["email"],
        schema: schema_for_type::<GetUserParams>,
    },
    ToolDefinition {
        tool: ToolName::ListFields,
        description: "List all available Jira fields",
        required: &[],
        schema: schema_for_empty_input,
    },
    ToolDefinition {
        tool: ToolName::ListIssueTypes,
        description: "List all available issue types",
        required: &[],
        schema: schema_for_empty_input,
    },
    ToolDefinition {
        tool: ToolName::ListLinkTypes,
        description: "List all available issue link types",
        required: &[],
        schema: schema_for_empty_input,
    },
    ToolDefinition {
        tool: ToolName::SearchIssues,
        description: "Search for issues in a project using JQL",
        required: &["projectKey", "jql"],
        schema: schema_for_type::<SearchIssuesParams>,
    },
    ToolDefinition {
        tool: ToolName::AddComment,
        description: "Add a comment to a Jira issue",
        required: &["issueKey", "comment"],
        schema: schema_for_type::<AddCommentParams>,
    },
    ToolDefinition {
        tool: ToolName::AddCommentWithAttachment,
        description: "Add a comment with an attachment to a Jira issue",
        required: &["issueKey", "comment", "attachment"],
        schema: schema_for_type::<AddCommentWithAttachmentParams>,
    },
    ToolDefinition {
        tool: ToolName::GetProjectSprints,
        description: "Get all sprints for a project",
        required: &["projectKey"],
        schema: schema_for_type::<GetProjectSprintsParams>,
    },
    ToolDefinition {
        tool: ToolName::TransitionIssue,
        description: "Transition a Jira issue to a new status",
        required: &["issueKey", "transition_name"],
        schema: schema_for_type::<TransitionIssueParams>,
    },
    ToolDefinition {
        tool: ToolName::GetBoards,
        description: "Get all Jira boards, optionally filtered by project",
        required: &[],
        schema: schema_for_type::<GetBoardsParams>,
    },
    ToolDefinition {
        tool: ToolName::GetBoardSprints,
        description: "Get all sprints from a Jira board, optionally filtered by state",
        required: &["boardId"],
        schema: schema_for_type::<GetBoardSprintsParams>,
    },
    ToolDefinition {
        tool: ToolName::AddIssuesToSprint,
        description: "Add one or more Jira issues to a sprint",
        required: &["sprintId", "issueKeys"],
        schema: schema_for_type::<AddIssuesToSprintParams>,
    },
    ToolDefinition {
        tool: ToolName::CreateSprint,
        description: "Create a new sprint in a board",
        required: &["boardId", "name"],
        schema: schema_for_type::<CreateSprintParams>,
    },
];

/// Full catalog in advertised order.
pub fn list() -> &'static [ToolDefinition] {
    CATALOG
}

/// Look up a tool by its protocol name.
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    CATALOG.iter().find(|def| def.name() == name)
}
