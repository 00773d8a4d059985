//! Issue tools: create, read, update, delete, search, link and transition.

use rmcp::{schemars, schemars::JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::jira::{IssueUpdate, JiraClient, JiraError, NewIssue};
use crate::mcp::error::DispatchError;
use crate::mcp::normalize::{self, CreatedIssueView, IssueSummaryView, IssueView};

use super::non_empty;

/// Maximum number of issues returned by `search_issues`.
pub(crate) const SEARCH_LIMIT: u32 = 30;

/// Fields requested for each search hit.
pub(crate) const SEARCH_FIELDS: &[&str] = &[
    "summary",
    "description",
    "status",
    "priority",
    "assignee",
    "issuetype",
];

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIssueParams {
    #[schemars(description = "Key of the issue to delete")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueParams {
    #[schemars(description = "Project key where the issue will be created")]
    pub project_key: String,
    #[schemars(description = "Issue summary/title")]
    pub summary: String,
    #[schemars(description = "Type of issue (e.g. Bug, Task, Story)")]
    pub issue_type: String,
    #[serde(default)]
    #[schemars(description = "Issue description")]
    pub description: Option<String>,
    #[serde(default)]
    #[schemars(description = "Issue priority")]
    pub priority: Option<String>,
    #[serde(default)]
    #[schemars(description = "Email of the assignee")]
    pub assignee: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueParams {
    #[schemars(description = "Key of the issue (e.g. PROJ-123)")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueLinkParams {
    #[schemars(description = "Key of the inward issue")]
    pub inward_issue_key: String,
    #[schemars(description = "Key of the outward issue")]
    pub outward_issue_key: String,
    #[schemars(description = "Type of link (e.g. 'Blocks')")]
    pub link_type: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueParams {
    #[schemars(description = "Key of the issue to update")]
    pub issue_key: String,
    #[serde(default)]
    #[schemars(description = "New summary")]
    pub summary: Option<String>,
    #[serde(default)]
    #[schemars(description = "New description")]
    pub description: Option<String>,
    #[serde(default)]
    #[schemars(description = "New assignee email")]
    pub assignee: Option<String>,
    #[serde(default)]
    #[schemars(description = "New status")]
    pub status: Option<String>,
    #[serde(default)]
    #[schemars(description = "New priority")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_string")]
    #[schemars(description = "Sprint ID to move the issue to")]
    pub sprint: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchIssuesParams {
    #[schemars(description = "Project key to search in")]
    pub project_key: String,
    #[schemars(description = "JQL filter statement")]
    pub jql: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TransitionIssueParams {
    #[serde(rename = "issueKey")]
    #[schemars(description = "Key of the issue to transition")]
    pub issue_key: String,
    #[schemars(description = "Name of the transition to perform (e.g. 'In Progress', 'Done')")]
    pub transition_name: String,
}

pub(super) async fn delete_issue<C: JiraClient>(
    client: &C,
    params: DeleteIssueParams,
) -> Result<Value, DispatchError> {
    client.delete_issue(&params.issue_key).await?;
    Ok(json!({
        "message": format!("Issue {} deleted successfully", params.issue_key)
    }))
}

pub(super) async fn create_issue<C: JiraClient>(
    client: &C,
    params: CreateIssueParams,
) -> Result<Value, DispatchError> {
    let issue = NewIssue {
        project_key: params.project_key,
        summary: params.summary,
        issue_type: params.issue_type,
        description: non_empty(params.description),
        priority: non_empty(params.priority),
        assignee: non_empty(params.assignee),
    };

    let created = client.create_issue(&issue).await?;
    debug!(key = %created.key, "created issue");
    normalize::payload(&CreatedIssueView::from(&created))
}

pub(super) async fn get_issue<C: JiraClient>(
    client: &C,
    params: GetIssueParams,
) -> Result<Value, DispatchError> {
    let issue = client.get_issue(&params.issue_key, true, true).await?;
    normalize::payload(&IssueView::from(&issue))
}

pub(super) async fn create_issue_link<C: JiraClient>(
    client: &C,
    params: CreateIssueLinkParams,
) -> Result<Value, DispatchError> {
    client
        .create_issue_link(
            &params.link_type,
            &params.inward_issue_key,
            &params.outward_issue_key,
        )
        .await?;
    Ok(json!({ "message": "Issue link created successfully" }))
}

pub(super) async fn update_issue<C: JiraClient>(
    client: &C,
    params: UpdateIssueParams,
) -> Result<Value, DispatchError> {
    let update = IssueUpdate {
        summary: non_empty(params.summary),
        description: non_empty(params.description),
        assignee: non_empty(params.assignee),
        status: non_empty(params.status),
        priority: non_empty(params.priority),
        sprint: non_empty(params.sprint),
    };

    client.update_issue(&params.issue_key, &update).await?;
    Ok(json!({
        "message": format!("Issue {} updated successfully", params.issue_key)
    }))
}

pub(super) async fn search_issues<C: JiraClient>(
    client: &C,
    params: SearchIssuesParams,
) -> Result<Value, DispatchError> {
    let jql = format!("project = {} AND {}", params.project_key, params.jql);
    let issues = client
        .search_issues(&jql, SEARCH_LIMIT, SEARCH_FIELDS)
        .await?;
    let rows: Vec<IssueSummaryView> = normalize::collect(&issues);
    normalize::payload(&rows)
}

pub(super) async fn transition_issue<C: JiraClient>(
    client: &C,
    params: TransitionIssueParams,
) -> Result<Value, DispatchError> {
    let transitions = client.list_transitions(&params.issue_key).await?;

    let wanted = params.transition_name.to_lowercase();
    let Some(transition) = transitions
        .iter()
        .find(|t| t.name.to_lowercase() == wanted)
    else {
        return Err(JiraError::TransitionNotFound {
            name: params.transition_name,
            available: transitions.into_iter().map(|t| t.name).collect(),
        }
        .into());
    };

    client
        .perform_transition(&params.issue_key, &transition.id)
        .await?;
    Ok(json!({
        "message": format!(
            "Issue {} transitioned to {} successfully",
            params.issue_key, params.transition_name
        )
    }))
}
