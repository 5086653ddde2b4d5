use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use tracing::debug;

use crate::domain::issue::{IssueReference, RepoRef};
use crate::error::{AppError, AppResult};
use crate::services::CodeHostReader;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn issue_endpoint(&self, repo: &RepoRef, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_url, repo.owner, repo.name, number
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.trim())),
            None => request,
        }
    }
}

#[async_trait]
impl CodeHostReader for GitHubClient {
    async fn fetch_issue(&self, repo: &RepoRef, number: u64) -> AppResult<IssueReference> {
        let url = self.issue_endpoint(repo, number);
        debug!(%repo, number, "fetching GitHub issue");

        let request = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, env!("CARGO_PKG_NAME"))
            .header(API_VERSION_HEADER, API_VERSION);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| AppError::SourceFetch(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::SourceFetch(format!(
                "GitHub responded with {status} for {repo}#{number}: {body}"
            )));
        }

        let payload: GitHubIssueResponse = response.json().await.map_err(|err| {
            AppError::SourceFetch(format!("failed to parse GitHub response: {err}"))
        })?;

        Ok(payload.into())
    }
}

#[derive(Deserialize)]
struct GitHubIssueResponse {
    html_url: String,
    title: String,
    body: Option<String>,
}

impl From<GitHubIssueResponse> for IssueReference {
    fn from(payload: GitHubIssueResponse) -> Self {
        Self {
            url: payload.html_url,
            title: payload.title,
            body: payload.body.unwrap_or_default(),
        }
    }
}
