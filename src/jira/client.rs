//! Capability interface over the issue tracker.
//!
//! The tool layer only ever talks to Jira through this trait. Every method
//! either returns the tracker's result or fails once with a [`JiraError`](super::JiraError);
//! retries, pooling and rate limiting belong to the implementation.

use std::future::Future;

use super::error::JiraResult;
use super::models::{
    Attachment, AttachmentFile, Board, Comment, CreatedIssue, Field, Issue, IssueLinkType,
    IssueType, IssueUpdate, NewIssue, NewSprint, Sprint, Transition, User,
};

pub trait JiraClient: Send + Sync {
    /// Create an issue and return its reference.
    fn create_issue(&self, issue: &NewIssue) -> impl Future<Output = JiraResult<CreatedIssue>> + Send;

    /// Fetch an issue, optionally expanding its comments and attachments.
    fn get_issue(
        &self,
        key: &str,
        expand_comments: bool,
        expand_attachments: bool,
    ) -> impl Future<Output = JiraResult<Issue>> + Send;

    fn update_issue(
        &self,
        key: &str,
        update: &IssueUpdate,
    ) -> impl Future<Output = JiraResult<()>> + Send;

    fn delete_issue(&self, key: &str) -> impl Future<Output = JiraResult<()>> + Send;

    fn add_comment(&self, key: &str, body: &str) -> impl Future<Output = JiraResult<Comment>> + Send;

    /// Upload a staged file to an issue.
    fn add_attachment(
        &self,
        key: &str,
        file: AttachmentFile<'_>,
    ) -> impl Future<Output = JiraResult<Attachment>> + Send;

    /// Run a JQL search, returning at most `max_results` issues with `fields` populated.
    fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: &[&str],
    ) -> impl Future<Output = JiraResult<Vec<Issue>>> + Send;

    fn create_issue_link(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> impl Future<Output = JiraResult<()>> + Send;

    fn search_users(&self, query: &str) -> impl Future<Output = JiraResult<Vec<User>>> + Send;

    fn list_fields(&self) -> impl Future<Output = JiraResult<Vec<Field>>> + Send;

    fn list_issue_types(&self) -> impl Future<Output = JiraResult<Vec<IssueType>>> + Send;

    fn list_issue_link_types(&self) -> impl Future<Output = JiraResult<Vec<IssueLinkType>>> + Send;

    /// List boards, restricted to one project when `project_key` is given.
    fn list_boards(
        &self,
        project_key: Option<&str>,
    ) -> impl Future<Output = JiraResult<Vec<Board>>> + Send;

    fn list_sprints(
        &self,
        board_id: u64,
        state: Option<&str>,
    ) -> impl Future<Output = JiraResult<Vec<Sprint>>> + Send;

    fn create_sprint(&self, sprint: &NewSprint) -> impl Future<Output = JiraResult<Sprint>> + Send;

    fn add_issues_to_sprint(
        &self,
        sprint_id: u64,
        keys: &[String],
    ) -> impl Future<Output = JiraResult<()>> + Send;

    fn list_transitions(&self, key: &str) -> impl Future<Output = JiraResult<Vec<Transition>>> + Send;

    fn perform_transition(
        &self,
        key: &str,
        transition_id: &str,
    ) -> impl Future<Output = JiraResult<()>> + Send;
}
