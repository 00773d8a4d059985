//! Board and sprint tools.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
use rmcp::{schemars, schemars::JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::jira::{JiraClient, NewSprint};
use crate::mcp::error::DispatchError;
use crate::mcp::normalize::{self, BoardSprintView, BoardView, CreatedSprintView, SprintView};

use super::non_empty;

/// Sentinel returned by `get_project_sprints` when the project has no boards.
pub(crate) const NO_BOARDS_MESSAGE: &str = "No boards found for this project";

const SPRINT_STATE: &str = "Optional sprint state filter ('active', 'future', 'closed')";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectSprintsParams {
    #[schemars(description = "The project key to get sprints for")]
    pub project_key: String,
    #[serde(default)]
    #[schemars(description = SPRINT_STATE)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBoardsParams {
    #[serde(default)]
    #[schemars(description = "Optional project key to filter boards")]
    pub project_key: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetBoardSprintsParams {
    #[serde(deserialize_with = "crate::serde_utils::lenient_id")]
    #[schemars(description = "ID of the board to get sprints from")]
    pub board_id: u64,
    #[serde(default)]
    #[schemars(description = SPRINT_STATE)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddIssuesToSprintParams {
    #[serde(deserialize_with = "crate::serde_utils::lenient_id")]
    #[schemars(description = "ID of the sprint to add issues to")]
    pub sprint_id: u64,
    #[schemars(description = "List of issue keys to add")]
    pub issue_keys: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSprintParams {
    #[serde(deserialize_with = "crate::serde_utils::lenient_id")]
    #[schemars(description = "ID of the board to create the sprint in")]
    pub board_id: u64,
    #[schemars(description = "Name of the sprint")]
    pub name: String,
    #[serde(default)]
    #[schemars(description = "Optional start date (YYYY-MM-DD or RFC 3339 timestamp)")]
    pub start_date: Option<String>,
    #[serde(default)]
    #[schemars(description = "Optional end date (YYYY-MM-DD or RFC 3339 timestamp)")]
    pub end_date: Option<String>,
    #[serde(default)]
    #[schemars(description = "Optional sprint goal")]
    pub goal: Option<String>,
}

/// Sprints of every board of a project, in board order.
pub(super) async fn get_project_sprints<C: JiraClient>(
    client: &C,
    params: GetProjectSprintsParams,
) -> Result<Value, DispatchError> {
    let boards = client.list_boards(Some(params.project_key.as_str())).await?;
    if boards.is_empty() {
        return Ok(json!({ "message": NO_BOARDS_MESSAGE }));
    }

    let state = non_empty(params.state);
    let mut sprints = Vec::new();
    for board in &boards {
        let board_sprints = client.list_sprints(board.id, state.as_deref()).await?;
        sprints.extend(
            board_sprints
                .iter()
                .map(|sprint| BoardSprintView::new(sprint, board.id)),
        );
    }

    normalize::payload(&sprints)
}

pub(super) async fn get_boards<C: JiraClient>(
    client: &C,
    params: GetBoardsParams,
) -> Result<Value, DispatchError> {
    let project_key = non_empty(params.project_key);
    let boards = client.list_boards(project_key.as_deref()).await?;
    let views: Vec<BoardView> = normalize::collect(&boards);
    normalize::payload(&views)
}

pub(super) async fn get_board_sprints<C: JiraClient>(
    client: &C,
    params: GetBoardSprintsParams,
) -> Result<Value, DispatchError> {
    let state = non_empty(params.state);
    let sprints = client.list_sprints(params.board_id, state.as_deref()).await?;
    let views: Vec<SprintView> = normalize::collect(&sprints);
    normalize::payload(&views)
}

pub(super) async fn add_issues_to_sprint<C: JiraClient>(
    client: &C,
    params: AddIssuesToSprintParams,
) -> Result<Value, DispatchError> {
    if params.issue_keys.is_empty() {
        return Err(DispatchError::invalid("issueKeys must not be empty"));
    }

    client
        .add_issues_to_sprint(params.sprint_id, &params.issue_keys)
        .await?;
    Ok(json!({
        "message": format!(
            "Successfully added {} issues to sprint {}",
            params.issue_keys.len(),
            params.sprint_id
        ),
        "issues": params.issue_keys,
    }))
}

pub(super) async fn create_sprint<C: JiraClient>(
    client: &C,
    params: CreateSprintParams,
) -> Result<Value, DispatchError> {
    let sprint = NewSprint {
        board_id: params.board_id,
        name: params.name,
        start_date: sprint_date("startDate", params.start_date)?,
        end_date: sprint_date("endDate", params.end_date)?,
        goal: non_empty(params.goal),
    };

    let created = client.create_sprint(&sprint).await?;
    normalize::payload(&CreatedSprintView::new(&created, params.board_id))
}

/// Accept `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub(crate) fn sprint_date(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, DispatchError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        return Ok(Some(midnight.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|_| Some(raw.to_string()))
        .map_err(|_| {
            DispatchError::invalid(format!(
                "{field} must be YYYY-MM-DD or an RFC 3339 timestamp, got '{raw}'"
            ))
        })
}
