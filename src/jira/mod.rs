//! Jira adapter.
//!
//! Everything that speaks the tracker's REST API lives here, behind the
//! [`JiraClient`] trait so the tool layer can be exercised without a network.
//!
//! - `client`: the capability trait
//! - `models`: tracker-native entities
//! - `error`: adapter failures, carrying Jira's error text verbatim
//! - `rest`: reqwest-backed implementation

mod client;
mod error;
mod models;
mod rest;


pub use client::JiraClient;
pub use error::{JiraError, JiraResult};
pub use models::*;
pub use rest::JiraRestClient;
