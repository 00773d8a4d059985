pub mod app;
pub mod config;
pub mod jira;
pub mod mcp;
pub mod serde_utils;
