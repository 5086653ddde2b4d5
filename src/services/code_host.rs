use async_trait::async_trait;

use crate::domain::issue::{IssueReference, RepoRef};
use crate::error::AppResult;

#[async_trait]
pub trait CodeHostReader: Send + Sync {
    async fn fetch_issue(&self, repo: &RepoRef, number: u64) -> AppResult<IssueReference>;
}
