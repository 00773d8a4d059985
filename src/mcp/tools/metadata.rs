//! Lookup tools: users, fields, issue types and link types.

use rmcp::{schemars, schemars::JsonSchema};
use serde::Deserialize;
use serde_json::Value;

use crate::jira::{JiraClient, JiraError};
use crate::mcp::error::DispatchError;
use crate::mcp::normalize::{self, FieldView, IssueTypeView, LinkTypeView, UserView};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetUserParams {
    #[schemars(description = "User's email address")]
    pub email: String,
}

/// First user matching the email wins.
pub(super) async fn get_user<C: JiraClient>(
    client: &C,
    params: GetUserParams,
) -> Result<Value, DispatchError> {
    let users = client.search_users(&params.email).await?;
    let user = users.first().ok_or(JiraError::UserNotFound {
        email: params.email.clone(),
    })?;
    normalize::payload(&UserView::from(user))
}

pub(super) async fn list_fields<C: JiraClient>(client: &C) -> Result<Value, DispatchError> {
    let fields = client.list_fields().await?;
    let views: Vec<FieldView> = normalize::collect(&fields);
    normalize::payload(&views)
}

pub(super) async fn list_issue_types<C: JiraClient>(client: &C) -> Result<Value, DispatchError> {
    let issue_types = client.list_issue_types().await?;
    let views: Vec<IssueTypeView> = normalize::collect(&issue_types);
    normalize::payload(&views)
}

pub(super) async fn list_link_types<C: JiraClient>(client: &C) -> Result<Value, DispatchError> {
    let link_types = client.list_issue_link_types().await?;
    let views: Vec<LinkTypeView> = normalize::collect(&link_types);
    normalize::payload(&views)
}
