//! Response normalization.
//!
//! Adapter results are mapped into flat view structs and serialized once into
//! a [`serde_json::Value`]. Optional tracker fields always serialize, as
//! `null` when absent, so callers never have to special-case missing keys.
//! Nested tracker objects (status, priority, assignee, type, author) are
//! rendered by display name.

use serde::Serialize;
use serde_json::Value;

use crate::jira::{
    Attachment, Board, Comment, CreatedIssue, Field, Issue, IssueLinkType, IssueType, NamedRef,
    Sprint, User,
};

use super::error::DispatchError;

/// Serialize a view into the payload of a successful result.
pub fn payload<T: Serialize>(view: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(view).map_err(|e| DispatchError::Internal {
        message: format!("failed to serialize response: {e}"),
    })
}

fn name_of(named: &Option<NamedRef>) -> Option<String> {
    named.as_ref().map(|n| n.name.clone())
}

fn display_name(user: &Option<User>) -> Option<String> {
    user.as_ref().map(|u| u.display_name.clone())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedIssueView {
    pub key: String,
    pub id: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

impl From<&CreatedIssue> for CreatedIssueView {
    fn from(created: &CreatedIssue) -> Self {
        Self {
            key: created.key.clone(),
            id: created.id.clone(),
            self_url: created.self_url.clone(),
        }
    }
}

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummaryView {
    pub key: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
}

impl From<&Issue> for IssueSummaryView {
    fn from(issue: &Issue) -> Self {
        let fields = &issue.fields;
        Self {
            key: issue.key.clone(),
            summary: fields.summary.clone(),
            status: name_of(&fields.status),
            priority: name_of(&fields.priority),
            assignee: display_name(&fields.assignee),
            issue_type: name_of(&fields.issuetype),
        }
    }
}

/// Full issue with its comments and attachments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueView {
    pub key: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub comments: Vec<CommentView>,
    pub attachments: Vec<AttachmentView>,
}

impl From<&Issue> for IssueView {
    fn from(issue: &Issue) -> Self {
        let fields = &issue.fields;
        let comments = fields
            .comment
            .as_ref()
            .map(|page| page.comments.iter().map(CommentView::from).collect())
            .unwrap_or_default();
        let attachments = fields
            .attachment
            .as_ref()
            .map(|items| items.iter().map(AttachmentView::from).collect())
            .unwrap_or_default();

        Self {
            key: issue.key.clone(),
            summary: fields.summary.clone(),
            description: fields.description.clone(),
            status: name_of(&fields.status),
            priority: name_of(&fields.priority),
            assignee: display_name(&fields.assignee),
            issue_type: name_of(&fields.issuetype),
            comments,
            attachments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub created: Option<String>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author: display_name(&comment.author),
            body: comment.body.clone(),
            created: comment.created.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentView {
    pub id: String,
    pub filename: String,
    pub size: u64,
    pub created: Option<String>,
}

impl From<&Attachment> for AttachmentView {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id.clone(),
            filename: attachment.filename.clone(),
            size: attachment.size,
            created: attachment.created.clone(),
        }
    }
}

/// User lookups keep the structured account shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub account_id: String,
    pub display_name: String,
    pub email_address: Option<String>,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            account_id: user.account_id.clone(),
            display_name: user.display_name.clone(),
            email_address: user.email_address.clone(),
            active: user.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub id: String,
    pub name: String,
    pub custom: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<&Field> for FieldView {
    fn from(field: &Field) -> Self {
        Self {
            id: field.id.clone(),
            name: field.name.clone(),
            custom: field.custom,
            kind: field.schema.as_ref().map(|s| s.kind.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueTypeView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub subtask: bool,
}

impl From<&IssueType> for IssueTypeView {
    fn from(issue_type: &IssueType) -> Self {
        Self {
            id: issue_type.id.clone(),
            name: issue_type.name.clone(),
            description: issue_type.description.clone(),
            subtask: issue_type.subtask,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkTypeView {
    pub id: String,
    pub name: String,
    pub inward: String,
    pub outward: String,
}

impl From<&IssueLinkType> for LinkTypeView {
    fn from(link_type: &IssueLinkType) -> Self {
        Self {
            id: link_type.id.clone(),
            name: link_type.name.clone(),
            inward: link_type.inward.clone(),
            outward: link_type.outward.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: BoardLocationView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocationView {
    pub project_name: Option<String>,
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            kind: board.kind.clone(),
            location: BoardLocationView {
                project_name: board
                    .location
                    .as_ref()
                    .and_then(|l| l.project_name.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintView {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<&Sprint> for SprintView {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id,
            name: sprint.name.clone(),
            state: sprint.state.clone(),
            start_date: sprint.start_date.clone(),
            end_date: sprint.end_date.clone(),
        }
    }
}

/// Sprint annotated with the board it was found on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSprintView {
    #[serde(flatten)]
    pub sprint: SprintView,
    pub board_id: u64,
}

impl BoardSprintView {
    pub fn new(sprint: &Sprint, board_id: u64) -> Self {
        Self {
            sprint: SprintView::from(sprint),
            board_id,
        }
    }
}

/// Freshly created sprint, including its goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSprintView {
    #[serde(flatten)]
    pub sprint: SprintView,
    pub goal: Option<String>,
    pub board_id: u64,
}

impl CreatedSprintView {
    pub fn new(sprint: &Sprint, board_id: u64) -> Self {
        Self {
            sprint: SprintView::from(sprint),
            goal: sprint.goal.clone(),
            board_id,
        }
    }
}

/// Map a tracker collection, keeping the tracker's order.
pub fn collect<'a, T: 'a, V>(items: impl IntoIterator<Item = &'a T>) -> Vec<V>
where
    V: From<&'a T>,
{
    items.into_iter().map(V::from).collect()
}
