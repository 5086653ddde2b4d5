use std::env;

use crate::error::{AppError, AppResult};

pub const DEFAULT_GITHUB_OWNER: &str = "triton-inference-server";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Values as found in the environment, before anything is required.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub jira_base_url: Option<String>,
    pub jira_user: Option<String>,
    pub jira_token: Option<String>,
    pub github_token: Option<String>,
    pub github_owner: Option<String>,
    pub github_api_url: Option<String>,
}

impl RawConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            jira_base_url: get("JIRA_API_URL"),
            jira_user: get("JIRA_USER").or_else(|| get("USER")),
            jira_token: get("JIRA_API_TOKEN"),
            github_token: get("GH_API_TOKEN"),
            github_owner: get("GITHUB_OWNER"),
            github_api_url: get("GITHUB_API_URL"),
        }
    }

    /// Explicit command-line values win over the environment.
    pub fn with_overrides(
        mut self,
        jira_base_url: Option<String>,
        jira_user: Option<String>,
    ) -> Self {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        if let Some(url) = present(jira_base_url) {
            self.jira_base_url = Some(url);
        }
        if let Some(user) = present(jira_user) {
            self.jira_user = Some(user);
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira_base_url: String,
    pub jira_user: String,
    pub jira_token: String,
    pub github_token: Option<String>,
    pub github_owner: String,
    pub github_api_url: String,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = AppError;

    fn try_from(raw: RawConfig) -> AppResult<Self> {
        let jira_base_url = require(raw.jira_base_url, "JIRA_API_URL")?;
        let jira_token = require(raw.jira_token, "JIRA_API_TOKEN")?;
        let jira_user = require(raw.jira_user, "JIRA_USER")?;

        Ok(Self {
            jira_base_url: jira_base_url.trim_end_matches('/').to_string(),
            jira_user,
            jira_token,
            github_token: raw.github_token,
            github_owner: raw
                .github_owner
                .unwrap_or_else(|| DEFAULT_GITHUB_OWNER.to_string()),
            github_api_url: raw
                .github_api_url
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
        })
    }
}

fn require(value: Option<String>, name: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::Configuration(format!("must set {name} environment variable")))
}
