//! Comment tools.

use rmcp::{schemars, schemars::JsonSchema};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::jira::JiraClient;
use crate::mcp::attachment::{AttachmentSpec, StagedAttachment};
use crate::mcp::error::DispatchError;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentParams {
    #[schemars(description = "Key of the issue to comment on")]
    pub issue_key: String,
    #[schemars(description = "Comment text content")]
    pub comment: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentWithAttachmentParams {
    #[schemars(description = "Key of the issue to comment on")]
    pub issue_key: String,
    #[schemars(description = "Comment text content")]
    pub comment: String,
    #[schemars(description = "File to attach")]
    pub attachment: AttachmentSpec,
}

pub(super) async fn add_comment<C: JiraClient>(
    client: &C,
    params: AddCommentParams,
) -> Result<Value, DispatchError> {
    let comment = client.add_comment(&params.issue_key, &params.comment).await?;
    Ok(json!({
        "message": "Comment added successfully",
        "id": comment.id,
    }))
}

/// Stage first so a bad payload never reaches the tracker, then comment and
/// upload. `staged` is dropped (and its file deleted) on every return path.
pub(super) async fn add_comment_with_attachment<C: JiraClient>(
    client: &C,
    params: AddCommentWithAttachmentParams,
) -> Result<Value, DispatchError> {
    let staged = StagedAttachment::stage(&params.attachment)?;

    let comment = client.add_comment(&params.issue_key, &params.comment).await?;
    let attachment = client
        .add_attachment(&params.issue_key, staged.as_file())
        .await?;

    Ok(json!({
        "message": "Comment and attachment added successfully",
        "comment_id": comment.id,
        "attachment_id": attachment.id,
    }))
}
