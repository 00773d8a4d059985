//! Tracker configuration.
//!
//! Credentials are read once at start-up from the environment. Any missing
//! required variable is fatal: the server never starts half-configured.

use std::env;
use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

pub const HOST_VAR: &str = "JIRA_HOST";
pub const EMAIL_VAR: &str = "JIRA_EMAIL";
pub const TOKEN_VAR: &str = "JIRA_API_TOKEN";
pub const SPRINT_FIELD_VAR: &str = "JIRA_SPRINT_FIELD";

/// Custom field Jira Cloud uses for the sprint of an issue.
pub const DEFAULT_SPRINT_FIELD: &str = "customfield_10020";

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    #[diagnostic(
        code(jira_mcp::config::missing_var),
        help("Set JIRA_HOST, JIRA_EMAIL and JIRA_API_TOKEN before starting the server.")
    )]
    MissingVar { name: &'static str },

    #[error("Invalid Jira host: '{value}'")]
    #[diagnostic(
        code(jira_mcp::config::invalid_host),
        help("Use a host name such as example.atlassian.net or a full https:// URL.")
    )]
    InvalidHost { value: String },
}

/// Connection settings for the Jira instance.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Base URL without trailing slash, e.g. `https://example.atlassian.net`
    pub base_url: String,
    /// Account email used for basic auth
    pub email: String,
    /// API token paired with `email`
    pub api_token: String,
    /// Custom field id holding the sprint of an issue
    pub sprint_field: String,
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("sprint_field", &self.sprint_field)
            .finish()
    }
}

impl JiraConfig {
    pub fn new(
        host: &str,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_host(host)?,
            email: email.into(),
            api_token: api_token.into(),
            sprint_field: DEFAULT_SPRINT_FIELD.to_string(),
        })
    }

    /// Override the sprint custom field id.
    pub fn with_sprint_field(mut self, field: impl Into<String>) -> Self {
        self.sprint_field = field.into();
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = required(HOST_VAR)?;
        let email = required(EMAIL_VAR)?;
        let token = required(TOKEN_VAR)?;

        let config = Self::new(&host, email, token)?;
        Ok(match optional(SPRINT_FIELD_VAR) {
            Some(field) => config.with_sprint_field(field),
            None => config,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar { name })
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accept either a bare host or a full URL; bare hosts get `https://`.
fn normalize_host(host: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidHost {
        value: host.to_string(),
    };

    let raw = host.trim();
    let (scheme, rest) = match raw.split_once("://") {
        Some((scheme @ ("http" | "https"), rest)) => (scheme, rest),
        Some(_) => return Err(invalid()),
        None => ("https", raw),
    };

    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    Ok(format!("{scheme}://{rest}"))
}
