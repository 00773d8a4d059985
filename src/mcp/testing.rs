//! Recording stand-in for the Jira adapter.
//!
//! Canned responses are plain fields; every call is logged by method name so
//! tests can assert which adapter operations ran, and in what order.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::jira::{
    Attachment, AttachmentFile, Board, Comment, CreatedIssue, Field, Issue, IssueFields,
    IssueLinkType, IssueType, IssueUpdate, JiraClient, JiraError, JiraResult, NewIssue, NewSprint,
    Sprint, Transition, User,
};

/// Snapshot of a file handed to `add_attachment`, taken while the call ran.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub key: String,
    pub path: PathBuf,
    pub existed: bool,
    pub contents: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Vec<&'static str>,
    pub new_issues: Vec<NewIssue>,
    pub updates: Vec<(String, IssueUpdate)>,
    pub searches: Vec<(String, u32, Vec<String>)>,
    pub comments: Vec<(String, String)>,
    pub uploads: Vec<UploadRecord>,
    pub links: Vec<(String, String, String)>,
    pub sprint_requests: Vec<(u64, Option<String>)>,
    pub board_filters: Vec<Option<String>>,
    pub new_sprints: Vec<NewSprint>,
    pub sprint_adds: Vec<(u64, Vec<String>)>,
    pub performed_transitions: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct StubJira {
    pub created: Option<CreatedIssue>,
    pub issue: Option<Issue>,
    pub search_results: Vec<Issue>,
    pub users: Vec<User>,
    pub fields: Vec<Field>,
    pub issue_types: Vec<IssueType>,
    pub link_types: Vec<IssueLinkType>,
    pub boards: Vec<Board>,
    pub sprints: HashMap<u64, Vec<Sprint>>,
    pub transitions: Vec<Transition>,
    /// Methods that fail with a 400 carrying the given message.
    pub failing: HashMap<&'static str, String>,
    /// Methods that panic when called.
    pub panicking: HashSet<&'static str>,
    pub log: Mutex<CallLog>,
}

impl StubJira {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, method: &'static str, message: impl Into<String>) -> Self {
        self.failing.insert(method, message.into());
        self
    }

    pub fn panicking(mut self, method: &'static str) -> Self {
        self.panicking.insert(method);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn with_log<R>(&self, f: impl FnOnce(&CallLog) -> R) -> R {
        f(&self.log.lock().unwrap())
    }

    fn record(&self, method: &'static str) -> JiraResult<()> {
        self.log.lock().unwrap().calls.push(method);
        if self.panicking.contains(method) {
            panic!("stub panic in {method}");
        }
        match self.failing.get(method) {
            Some(message) => Err(JiraError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn issue(key: &str, summary: &str) -> Issue {
    Issue {
        id: format!("id-{key}"),
        key: key.to_string(),
        fields: IssueFields {
            summary: Some(summary.to_string()),
            ..IssueFields::default()
        },
    }
}

pub fn sprint(id: u64, name: &str, state: &str) -> Sprint {
    Sprint {
        id,
        name: name.to_string(),
        state: state.to_string(),
        start_date: None,
        end_date: None,
        goal: None,
    }
}

pub fn board(id: u64, name: &str) -> Board {
    Board {
        id,
        name: name.to_string(),
        kind: "scrum".to_string(),
        location: None,
    }
}

pub fn user(account_id: &str, display_name: &str, email: &str) -> User {
    User {
        account_id: account_id.to_string(),
        display_name: display_name.to_string(),
        email_address: Some(email.to_string()),
        active: true,
    }
}

impl JiraClient for StubJira {
    async fn create_issue(&self, issue: &NewIssue) -> JiraResult<CreatedIssue> {
        self.record("create_issue")?;
        self.log.lock().unwrap().new_issues.push(issue.clone());
        Ok(self.created.clone().unwrap_or_else(|| CreatedIssue {
            id: "10000".to_string(),
            key: format!("{}-1", issue.project_key),
            self_url: "https://example.atlassian.net/rest/api/2/issue/10000".to_string(),
        }))
    }

    async fn get_issue(
        &self,
        key: &str,
        _expand_comments: bool,
        _expand_attachments: bool,
    ) -> JiraResult<Issue> {
        self.record("get_issue")?;
        Ok(self.issue.clone().unwrap_or_else(|| issue(key, "stub")))
    }

    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> JiraResult<()> {
        self.record("update_issue")?;
        self.log
            .lock()
            .unwrap()
            .updates
            .push((key.to_string(), update.clone()));
        Ok(())
    }

    async fn delete_issue(&self, _key: &str) -> JiraResult<()> {
        self.record("delete_issue")
    }

    async fn add_comment(&self, key: &str, body: &str) -> JiraResult<Comment> {
        self.record("add_comment")?;
        self.log
            .lock()
            .unwrap()
            .comments
            .push((key.to_string(), body.to_string()));
        Ok(Comment {
            id: "20000".to_string(),
            author: None,
            body: body.to_string(),
            created: None,
        })
    }

    async fn add_attachment(&self, key: &str, file: AttachmentFile<'_>) -> JiraResult<Attachment> {
        let contents = std::fs::read(file.path).unwrap_or_default();
        self.log.lock().unwrap().uploads.push(UploadRecord {
            key: key.to_string(),
            path: file.path.to_path_buf(),
            existed: file.path.exists(),
            contents: contents.clone(),
            filename: file.filename.to_string(),
            mime_type: file.mime_type.to_string(),
        });
        self.record("add_attachment")?;
        Ok(Attachment {
            id: "30000".to_string(),
            filename: file.filename.to_string(),
            size: contents.len() as u64,
            created: None,
            mime_type: Some(file.mime_type.to_string()),
        })
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: &[&str],
    ) -> JiraResult<Vec<Issue>> {
        self.record("search_issues")?;
        self.log.lock().unwrap().searches.push((
            jql.to_string(),
            max_results,
            fields.iter().map(|f| f.to_string()).collect(),
        ));
        Ok(self.search_results.clone())
    }

    async fn create_issue_link(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> JiraResult<()> {
        self.record("create_issue_link")?;
        self.log.lock().unwrap().links.push((
            link_type.to_string(),
            inward_key.to_string(),
            outward_key.to_string(),
        ));
        Ok(())
    }

    async fn search_users(&self, _query: &str) -> JiraResult<Vec<User>> {
        self.record("search_users")?;
        Ok(self.users.clone())
    }

    async fn list_fields(&self) -> JiraResult<Vec<Field>> {
        self.record("list_fields")?;
        Ok(self.fields.clone())
    }

    async fn list_issue_types(&self) -> JiraResult<Vec<IssueType>> {
        self.record("list_issue_types")?;
        Ok(self.issue_types.clone())
    }

    async fn list_issue_link_types(&self) -> JiraResult<Vec<IssueLinkType>> {
        self.record("list_issue_link_types")?;
        Ok(self.link_types.clone())
    }

    async fn list_boards(&self, project_key: Option<&str>) -> JiraResult<Vec<Board>> {
        self.record("list_boards")?;
        self.log
            .lock()
            .unwrap()
            .board_filters
            .push(project_key.map(str::to_string));
        Ok(self.boards.clone())
    }

    async fn list_sprints(&self, board_id: u64, state: Option<&str>) -> JiraResult<Vec<Sprint>> {
        self.record("list_sprints")?;
        self.log
            .lock()
            .unwrap()
            .sprint_requests
            .push((board_id, state.map(str::to_string)));
        Ok(self.sprints.get(&board_id).cloned().unwrap_or_default())
    }

    async fn create_sprint(&self, sprint: &NewSprint) -> JiraResult<Sprint> {
        self.record("create_sprint")?;
        self.log.lock().unwrap().new_sprints.push(sprint.clone());
        Ok(Sprint {
            id: 77,
            name: sprint.name.clone(),
            state: "future".to_string(),
            start_date: sprint.start_date.clone(),
            end_date: sprint.end_date.clone(),
            goal: sprint.goal.clone(),
        })
    }

    async fn add_issues_to_sprint(&self, sprint_id: u64, keys: &[String]) -> JiraResult<()> {
        self.record("add_issues_to_sprint")?;
        self.log
            .lock()
            .unwrap()
            .sprint_adds
            .push((sprint_id, keys.to_vec()));
        Ok(())
    }

    async fn list_transitions(&self, _key: &str) -> JiraResult<Vec<Transition>> {
        self.record("list_transitions")?;
        Ok(self.transitions.clone())
    }

    async fn perform_transition(&self, key: &str, transition_id: &str) -> JiraResult<()> {
        self.record("perform_transition")?;
        self.log
            .lock()
            .unwrap()
            .performed_transitions
            .push((key.to_string(), transition_id.to_string()));
        Ok(())
    }
}
