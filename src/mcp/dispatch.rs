//! Tool dispatch
//!
//! A [`ToolCall`] goes through three steps: validation against the catalog,
//! the tool's handler, and wrapping into a [`ToolResult`]. Nothing escapes
//! [`Dispatcher::dispatch`]: adapter failures, bad arguments and even panics
//! inside a handler come back as an error result.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::jira::JiraClient;

use super::catalog::{self, ToolDefinition};
use super::error::{self, DispatchError};
use super::tools;
use super::validate::validate;

/// Tool call arguments, keyed by argument name.
pub type JsonObject = serde_json::Map<String, Value>;

/// A single tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: JsonObject,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// Normalized JSON payload.
    Success(Value),
    /// Error envelope: `Operation failed: <cause>`.
    Error { message: String },
}

impl ToolResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Error { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ToolResult::Success(value) => Some(value),
            ToolResult::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ToolResult::Success(_) => None,
            ToolResult::Error { message } => Some(message),
        }
    }
}

/// Routes tool calls to their handlers.
///
/// Generic over `C: JiraClient` so tests can swap in a recording stub.
pub struct Dispatcher<C: JiraClient> {
    client: Arc<C>,
}

impl<C: JiraClient> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: JiraClient> Dispatcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Every tool this dispatcher answers to, in catalog order.
    pub fn tools(&self) -> &'static [ToolDefinition] {
        catalog::list()
    }

    /// Run one call to completion.
    #[tracing::instrument(skip(self, call), fields(tool = %call.name))]
    pub async fn dispatch(&self, call: ToolCall) -> ToolResult {
        match self.run(&call).await {
            Ok(payload) => {
                debug!("tool call succeeded");
                ToolResult::Success(payload)
            }
            Err(e) => {
                warn!(error = %e, "tool call failed");
                error::wrap(&e)
            }
        }
    }

    async fn run(&self, call: &ToolCall) -> Result<Value, DispatchError> {
        let definition = validate(&call.name, &call.arguments)?;

        let handler = tools::route(definition.tool, self.client.as_ref(), &call.arguments);
        match AssertUnwindSafe(handler).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(%message, "tool handler panicked");
                Err(DispatchError::Internal { message })
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("handler panicked: {message}")
    } else {
        "handler panicked".to_string()
    }
}
