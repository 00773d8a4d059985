//! Model Context Protocol (MCP) server implementation
//!
//! Exposes the Jira tool catalog over MCP, on stdio or Streamable HTTP.
//!
//! # Architecture
//!
//! - **catalog**: static tool table (names, descriptions, argument schemas)
//! - **validate**: presence check of required arguments
//! - **tools**: one handler per tool, grouped by tracker area
//! - **normalize**: flat JSON views of tracker entities
//! - **attachment**: base64 staging into self-deleting temp files
//! - **dispatch**: validate, route, wrap; never lets a failure escape
//! - **server** / **service**: rmcp glue and transports
//!
//! Everything is generic over `C: JiraClient`, using zero-cost abstractions
//! (no dynamic dispatch).

pub mod attachment;
pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod server;
mod service;
mod tools;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod server_test;

pub use dispatch::{Dispatcher, JsonObject, ToolCall, ToolResult};
pub use error::DispatchError;
pub use server::JiraMcpServer;
pub use service::{create_mcp_service, serve_stdio};
