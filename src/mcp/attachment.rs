//! Attachment staging.
//!
//! A base64 payload from a tool call is decoded into a named temporary file
//! that lives exactly as long as the [`StagedAttachment`]. Dropping it
//! deletes the file, so the file cannot outlive the call on any exit path.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rmcp::{schemars, schemars::JsonSchema};
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::jira::AttachmentFile;

use super::error::DispatchError;

/// Attachment as sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSpec {
    #[schemars(description = "Name of the file")]
    pub filename: String,
    #[schemars(description = "Base64 encoded file content")]
    pub content: String,
    #[serde(default)]
    #[schemars(description = "MIME type of the file (guessed from the filename when omitted)")]
    pub mime_type: Option<String>,
}

/// Longest extension carried over to the temporary file name.
const MAX_EXTENSION_LEN: usize = 16;

#[derive(Debug)]
pub struct StagedAttachment {
    file: NamedTempFile,
    filename: String,
    mime_type: String,
    len: usize,
}

impl StagedAttachment {
    /// Decode `spec.content` and write it to a fresh temporary file.
    pub fn stage(spec: &AttachmentSpec) -> Result<Self, DispatchError> {
        let encoded: String = spec
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(encoded)?;

        let mut file = tempfile::Builder::new()
            .prefix("jira-attachment-")
            .suffix(&temp_suffix(&spec.filename))
            .tempfile()
            .map_err(DispatchError::Staging)?;
        file.write_all(&bytes).map_err(DispatchError::Staging)?;
        file.flush().map_err(DispatchError::Staging)?;

        let mime_type = spec
            .mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(&spec.filename)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        debug!(
            path = %file.path().display(),
            filename = %spec.filename,
            bytes = bytes.len(),
            "staged attachment"
        );

        Ok(Self {
            file,
            filename: spec.filename.clone(),
            mime_type,
            len: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow as an upload handle for the adapter.
    pub fn as_file(&self) -> AttachmentFile<'_> {
        AttachmentFile {
            path: self.path(),
            filename: &self.filename,
            mime_type: &self.mime_type,
        }
    }
}

/// Only the extension of the caller's name reaches the filesystem. The full
/// name travels with the upload, so its length is never bounded by NAME_MAX.
fn temp_suffix(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(sanitize_filename::sanitize)
        .filter(|ext| !ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
