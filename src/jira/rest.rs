//! Jira Cloud REST implementation of [`JiraClient`].

use std::collections::BTreeMap;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::config::JiraConfig;

use super::client::JiraClient;
use super::error::{JiraError, JiraResult};
use super::models::{
    Attachment, AttachmentFile, Board, Comment, CreatedIssue, Field, Issue, IssueLinkType,
    IssueType, IssueUpdate, NewIssue, NewSprint, Sprint, Transition, User,
};

const PLATFORM_API: [&str; 3] = ["rest", "api", "2"];
const AGILE_API: [&str; 3] = ["rest", "agile", "1.0"];

/// Fields requested when fetching a single issue.
const ISSUE_FIELDS: &str = "summary,description,status,priority,assignee,issuetype";

/// Client for the Jira platform and agile REST APIs.
#[derive(Clone)]
pub struct JiraRestClient {
    base_url: Url,
    email: String,
    api_token: String,
    sprint_field: String,
    client: Client,
}

impl JiraRestClient {
    /// Create a client from validated configuration.
    ///
    /// A rustls crypto provider must be installed before calling this.
    pub fn new(config: &JiraConfig) -> JiraResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| JiraError::InvalidRequest {
            message: format!("invalid base URL '{}': {e}", config.base_url),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(JiraError::InvalidRequest {
                message: format!("base URL '{}' cannot carry a path", config.base_url),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("jira-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            email: config.email.clone(),
            api_token: config.api_token.clone(),
            sprint_field: config.sprint_field.clone(),
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, api: [&str; 3], segments: &[&str]) -> JiraResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| JiraError::InvalidRequest {
                message: format!("base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(api)
            .extend(segments);
        Ok(url)
    }

    fn platform(&self, segments: &[&str]) -> JiraResult<Url> {
        self.endpoint(PLATFORM_API, segments)
    }

    fn agile(&self, segments: &[&str]) -> JiraResult<Url> {
        self.endpoint(AGILE_API, segments)
    }

    /// Authenticated request builder
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> JiraResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn send_empty(request: RequestBuilder) -> JiraResult<()> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    /// Handle a Jira response with standardized error handling
    ///
    /// Returns the deserialized body on success, or `JiraError::Api` carrying
    /// Jira's own error text on non-success status codes.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> JiraResult<T> {
        if response.status().is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(JiraError::from)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn api_error(response: Response) -> JiraError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        debug!(status, body = %body, "Jira request failed");
        JiraError::Api {
            status,
            message: error_message(&body),
        }
    }

    /// Follow agile `startAt`/`isLast` paging until the last page.
    async fn collect_pages<T>(&self, url: Url, query: &[(&str, String)]) -> JiraResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            let request = self
                .request(Method::GET, url.clone())
                .query(query)
                .query(&[("startAt", start_at)]);
            let page: AgilePage<T> = Self::send_json(request).await?;

            let fetched = page.values.len() as u64;
            items.extend(page.values);

            if page.is_last.unwrap_or(true) || fetched == 0 {
                break;
            }
            start_at += fetched;
        }

        Ok(items)
    }

    fn update_fields(&self, update: &IssueUpdate) -> serde_json::Map<String, Value> {
        let mut fields = serde_json::Map::new();
        if let Some(summary) = &update.summary {
            fields.insert("summary".into(), json!(summary));
        }
        if let Some(description) = &update.description {
            fields.insert("description".into(), json!(description));
        }
        if let Some(assignee) = &update.assignee {
            fields.insert("assignee".into(), json!({ "emailAddress": assignee }));
        }
        if let Some(status) = &update.status {
            fields.insert("status".into(), json!({ "name": status }));
        }
        if let Some(priority) = &update.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if let Some(sprint) = &update.sprint {
            let value = match sprint.trim().parse::<u64>() {
                Ok(id) => json!(id),
                Err(_) => json!(sprint),
            };
            fields.insert(self.sprint_field.clone(), value);
        }
        fields
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgilePage<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
    #[serde(default)]
    is_last: Option<bool>,
}

/// First page of `/search/jql`; `nextPageToken` is not followed.
#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkTypes {
    #[serde(default)]
    issue_link_types: Vec<IssueLinkType>,
}

#[derive(Deserialize)]
struct Transitions {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, Value>,
}

/// Render Jira's error payload (`errorMessages` + `errors`) as one line of text.
/// Anything that is not a Jira error document is passed through as-is.
pub(crate) fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) if !parsed.error_messages.is_empty() || !parsed.errors.is_empty() => {
            let mut parts = parsed.error_messages;
            parts.extend(parsed.errors.into_iter().map(|(field, message)| {
                match message {
                    Value::String(text) => format!("{field}: {text}"),
                    other => format!("{field}: {other}"),
                }
            }));
            parts.join("; ")
        }
        _ if trimmed.is_empty() => "empty response body".to_string(),
        _ => trimmed.to_string(),
    }
}

impl JiraClient for JiraRestClient {
    #[instrument(skip(self, issue), fields(project = %issue.project_key))]
    async fn create_issue(&self, issue: &NewIssue) -> JiraResult<CreatedIssue> {
        let mut fields = serde_json::Map::new();
        fields.insert("project".into(), json!({ "key": issue.project_key }));
        fields.insert("summary".into(), json!(issue.summary));
        fields.insert("issuetype".into(), json!({ "name": issue.issue_type }));
        if let Some(description) = &issue.description {
            fields.insert("description".into(), json!(description));
        }
        if let Some(priority) = &issue.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if let Some(assignee) = &issue.assignee {
            fields.insert("assignee".into(), json!({ "emailAddress": assignee }));
        }

        let url = self.platform(&["issue"])?;
        Self::send_json(
            self.request(Method::POST, url)
                .json(&json!({ "fields": fields })),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_issue(
        &self,
        key: &str,
        expand_comments: bool,
        expand_attachments: bool,
    ) -> JiraResult<Issue> {
        let mut fields = ISSUE_FIELDS.to_string();
        if expand_comments {
            fields.push_str(",comment");
        }
        if expand_attachments {
            fields.push_str(",attachment");
        }

        let url = self.platform(&["issue", key])?;
        Self::send_json(self.request(Method::GET, url).query(&[("fields", fields)])).await
    }

    #[instrument(skip(self, update))]
    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> JiraResult<()> {
        let fields = self.update_fields(update);
        let url = self.platform(&["issue", key])?;
        Self::send_empty(
            self.request(Method::PUT, url)
                .json(&json!({ "fields": fields })),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_issue(&self, key: &str) -> JiraResult<()> {
        let url = self.platform(&["issue", key])?;
        Self::send_empty(self.request(Method::DELETE, url)).await
    }

    #[instrument(skip(self, body))]
    async fn add_comment(&self, key: &str, body: &str) -> JiraResult<Comment> {
        let url = self.platform(&["issue", key, "comment"])?;
        Self::send_json(self.request(Method::POST, url).json(&json!({ "body": body }))).await
    }

    #[instrument(skip(self, file), fields(filename = %file.filename))]
    async fn add_attachment(&self, key: &str, file: AttachmentFile<'_>) -> JiraResult<Attachment> {
        let bytes = tokio::fs::read(file.path)
            .await
            .map_err(JiraError::StagedFile)?;

        let part = Part::bytes(bytes)
            .file_name(file.filename.to_string())
            .mime_str(file.mime_type)
            .map_err(|e| JiraError::InvalidRequest {
                message: format!("invalid MIME type '{}': {e}", file.mime_type),
            })?;

        let url = self.platform(&["issue", key, "attachments"])?;
        let request = self
            .request(Method::POST, url)
            .header("X-Atlassian-Token", "no-check")
            .multipart(Form::new().part("file", part));

        let uploaded: Vec<Attachment> = Self::send_json(request).await?;
        uploaded
            .into_iter()
            .next()
            .ok_or(JiraError::EmptyAttachmentResponse)
    }

    #[instrument(skip(self, fields))]
    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: &[&str],
    ) -> JiraResult<Vec<Issue>> {
        // Legacy `/search` is removed on Cloud
        let url = self.platform(&["search", "jql"])?;
        let request = self.request(Method::GET, url).query(&[
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
            ("fields", fields.join(",")),
        ]);
        let page: SearchPage = Self::send_json(request).await?;
        Ok(page.issues)
    }

    #[instrument(skip(self))]
    async fn create_issue_link(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> JiraResult<()> {
        let url = self.platform(&["issueLink"])?;
        Self::send_empty(self.request(Method::POST, url).json(&json!({
            "type": { "name": link_type },
            "inwardIssue": { "key": inward_key },
            "outwardIssue": { "key": outward_key },
        })))
        .await
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str) -> JiraResult<Vec<User>> {
        let url = self.platform(&["user", "search"])?;
        Self::send_json(self.request(Method::GET, url).query(&[("query", query)])).await
    }

    #[instrument(skip(self))]
    async fn list_fields(&self) -> JiraResult<Vec<Field>> {
        let url = self.platform(&["field"])?;
        Self::send_json(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self))]
    async fn list_issue_types(&self) -> JiraResult<Vec<IssueType>> {
        let url = self.platform(&["issuetype"])?;
        Self::send_json(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self))]
    async fn list_issue_link_types(&self) -> JiraResult<Vec<IssueLinkType>> {
        let url = self.platform(&["issueLinkType"])?;
        let types: LinkTypes = Self::send_json(self.request(Method::GET, url)).await?;
        Ok(types.issue_link_types)
    }

    #[instrument(skip(self))]
    async fn list_boards(&self, project_key: Option<&str>) -> JiraResult<Vec<Board>> {
        let url = self.agile(&["board"])?;
        let query: Vec<(&str, String)> = project_key
            .map(|key| vec![("projectKeyOrId", key.to_string())])
            .unwrap_or_default();
        self.collect_pages(url, &query).await
    }

    #[instrument(skip(self))]
    async fn list_sprints(&self, board_id: u64, state: Option<&str>) -> JiraResult<Vec<Sprint>> {
        let board = board_id.to_string();
        let url = self.agile(&["board", &board, "sprint"])?;
        let query: Vec<(&str, String)> = state
            .map(|state| vec![("state", state.to_string())])
            .unwrap_or_default();
        self.collect_pages(url, &query).await
    }

    #[instrument(skip(self, sprint), fields(board_id = sprint.board_id, name = %sprint.name))]
    async fn create_sprint(&self, sprint: &NewSprint) -> JiraResult<Sprint> {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), json!(sprint.name));
        body.insert("originBoardId".into(), json!(sprint.board_id));
        if let Some(start) = &sprint.start_date {
            body.insert("startDate".into(), json!(start));
        }
        if let Some(end) = &sprint.end_date {
            body.insert("endDate".into(), json!(end));
        }
        if let Some(goal) = &sprint.goal {
            body.insert("goal".into(), json!(goal));
        }

        let url = self.agile(&["sprint"])?;
        Self::send_json(self.request(Method::POST, url).json(&body)).await
    }

    #[instrument(skip(self))]
    async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> JiraResult<()> {
        let sprint = sprint_id.to_string();
        let url = self.agile(&["sprint", &sprint, "issue"])?;
        Self::send_empty(self.request(Method::POST, url).json(&json!({ "issues": keys }))).await
    }

    #[instrument(skip(self))]
    async fn list_transitions(&self, key: &str) -> JiraResult<Vec<Transition>> {
        let url = self.platform(&["issue", key, "transitions"])?;
        let transitions: Transitions = Self::send_json(self.request(Method::GET, url)).await?;
        Ok(transitions.transitions)
    }

    #[instrument(skip(self))]
    async fn perform_transition(&self, key: &str, transition_id: &str) -> JiraResult<()> {
        let url = self.platform(&["issue", key, "transitions"])?;
        Self::send_empty(
            self.request(Method::POST, url)
                .json(&json!({ "transition": { "id": transition_id } })),
        )
        .await
    }
}
