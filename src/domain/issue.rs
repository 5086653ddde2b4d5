use crate::error::{AppError, AppResult};

/// Title, body and canonical URL of an issue on the code host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    pub url: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Accepts `owner/name`, or a bare `name` which is placed under `default_owner`.
    pub fn parse(value: &str, default_owner: &str) -> AppResult<Self> {
        let value = value.trim().trim_matches('/');
        let (owner, name) = match value.split_once('/') {
            Some((owner, name)) => (owner.trim(), name.trim()),
            None => (default_owner.trim(), value),
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(AppError::Validation(format!(
                "repository '{value}' must be 'name' or 'owner/name'"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSource {
    /// Looked up on the code host at run time.
    Remote { repo: RepoRef, number: u64 },
    /// Supplied by the operator, typically from a CI event payload.
    Prefetched {
        number: u64,
        reference: IssueReference,
    },
}

impl IssueSource {
    pub fn number(&self) -> u64 {
        match self {
            IssueSource::Remote { number, .. } | IssueSource::Prefetched { number, .. } => {
                *number
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_repo_with_default_owner() {
        let repo = RepoRef::parse("server", "triton-inference-server").unwrap();
        assert_eq!(repo.owner, "triton-inference-server");
        assert_eq!(repo.name, "server");
        assert_eq!(repo.to_string(), "triton-inference-server/server");
    }

    #[test]
    fn parses_qualified_repo() {
        let repo = RepoRef::parse("acme/widgets", "ignored").unwrap();
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn rejects_malformed_repo() {
        assert!(RepoRef::parse("a/b/c", "owner").is_err());
        assert!(RepoRef::parse("", "owner").is_err());
        assert!(RepoRef::parse("server", "").is_err());
    }
}
