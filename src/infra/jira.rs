use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::links::LinkEntry;
use crate::domain::ticket::TicketSpec;
use crate::error::{AppError, AppResult};
use crate::services::TicketTracker;

pub struct JiraClient {
    http: Client,
    base_url: String,
    user: String,
    token: String,
}

impl JiraClient {
    pub fn new(base_url: String, user: String, token: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user,
            token,
        }
    }

    fn auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.user, self.token);
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(&self) -> String {
        format!("{}/rest/api/3/issue", self.base_url)
    }

    fn remote_link_endpoint(&self, key: &str) -> String {
        format!("{}/rest/api/3/issue/{}/remotelink", self.base_url, key)
    }

    async fn post<T: Serialize + ?Sized>(&self, url: String, body: &T) -> Result<Response, String> {
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| format!("failed to call Jira: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(format!("Jira responded with {status}: {body}"));
        }
        Ok(response)
    }
}

#[async_trait]
impl TicketTracker for JiraClient {
    async fn create_ticket(&self, spec: &TicketSpec) -> AppResult<String> {
        let request_body = JiraCreateIssueRequest::from_spec(spec);
        debug!(board = spec.board.as_str(), summary = %spec.summary, "creating Jira issue");

        let response = self
            .post(self.issue_endpoint(), &request_body)
            .await
            .map_err(AppError::Creation)?;

        let payload: JiraCreateIssueResponse = response.json().await.map_err(|err| {
            AppError::Creation(format!("failed to parse Jira response: {err}"))
        })?;

        debug!(key = %payload.key, "Jira issue created");
        Ok(payload.key)
    }

    async fn add_link(&self, key: &str, link: &LinkEntry) -> AppResult<()> {
        let request_body = JiraRemoteLinkRequest {
            object: JiraRemoteLinkObject {
                url: &link.url,
                title: &link.title,
            },
        };
        debug!(key, title = %link.title, url = %link.url, "adding Jira remote link");

        self.post(self.remote_link_endpoint(key), &request_body)
            .await
            .map_err(|reason| AppError::LinkAttach {
                key: key.to_string(),
                title: link.title.clone(),
                reason,
            })?;
        Ok(())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn from_spec(spec: &TicketSpec) -> Self {
        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: spec.board.as_str().to_string(),
                },
                summary: spec.summary.clone(),
                description: JiraDescription::from_text(&spec.description),
                issuetype: JiraNamed {
                    name: spec.issue_type.as_str().to_string(),
                },
                components: spec
                    .components
                    .iter()
                    .map(|component| JiraNamed {
                        name: component.as_str().to_string(),
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    issuetype: JiraNamed,
    components: Vec<JiraNamed>,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraNamed {
    name: String,
}

/// Atlassian Document Format body. Blank lines split paragraphs; single newlines
/// become hard breaks so reference lists keep one URL per line.
#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn from_text(description: &str) -> Self {
        let cleaned = description.replace('\r', "");
        let content = cleaned
            .split("\n\n")
            .map(|section| section.trim_matches('\n'))
            .filter(|section| !section.trim().is_empty())
            .map(JiraDocNode::paragraph)
            .collect();

        Self {
            doc_type: "doc",
            version: 1,
            content,
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraInline>,
}

impl JiraDocNode {
    fn paragraph(section: &str) -> Self {
        let mut content = Vec::new();
        for (index, line) in section.split('\n').enumerate() {
            if index > 0 {
                content.push(JiraInline::HardBreak);
            }
            if !line.is_empty() {
                content.push(JiraInline::Text {
                    text: line.to_string(),
                });
            }
        }

        Self {
            node_type: "paragraph",
            content,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JiraInline {
    Text { text: String },
    HardBreak,
}

#[derive(Serialize)]
struct JiraRemoteLinkRequest<'a> {
    object: JiraRemoteLinkObject<'a>,
}

#[derive(Serialize)]
struct JiraRemoteLinkObject<'a> {
    url: &'a str,
    title: &'a str,
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    key: String,
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::domain::ticket::TicketSpec;

    fn client() -> JiraClient {
        JiraClient::new(
            "https://jira.example.com/".to_string(),
            "dev@example.com".to_string(),
            "token".to_string(),
        )
    }

    #[test]
    fn builds_endpoints_without_double_slashes() {
        let client = client();
        assert_eq!(client.issue_endpoint(), "https://jira.example.com/rest/api/3/issue");
        assert_eq!(
            client.remote_link_endpoint("DLIS-7"),
            "https://jira.example.com/rest/api/3/issue/DLIS-7/remotelink"
        );
        assert_eq!(client.browse_url("DLIS-7"), "https://jira.example.com/browse/DLIS-7");
    }

    #[test]
    fn encodes_basic_auth() {
        assert_eq!(
            client().auth_header(),
            format!("Basic {}", BASE64_STANDARD.encode("dev@example.com:token"))
        );
    }

    #[test]
    fn serializes_issue_fields() {
        let spec = TicketSpec::build(
            "Crash on load",
            "steps...\nReferences\n- http://a\n- http://b\n".to_string(),
            "DLIS",
            "Bug",
            &["GitHub".to_string(), "Triton CLI".to_string()],
        )
        .unwrap();

        let value = serde_json::to_value(JiraCreateIssueRequest::from_spec(&spec)).unwrap();
        assert_eq!(
            value,
            json!({
                "fields": {
                    "project": { "key": "DLIS" },
                    "summary": "Crash on load",
                    "description": {
                        "type": "doc",
                        "version": 1,
                        "content": [{
                            "type": "paragraph",
                            "content": [
                                { "type": "text", "text": "steps..." },
                                { "type": "hardBreak" },
                                { "type": "text", "text": "References" },
                                { "type": "hardBreak" },
                                { "type": "text", "text": "- http://a" },
                                { "type": "hardBreak" },
                                { "type": "text", "text": "- http://b" }
                            ]
                        }]
                    },
                    "issuetype": { "name": "Bug" },
                    "components": [{ "name": "GitHub" }, { "name": "Triton CLI" }]
                }
            })
        );
    }

    #[test]
    fn splits_placeholder_into_paragraphs() {
        let description =
            JiraDescription::from_text("Description: <TODO>\n\nReferences\n- http://s1\n");
        let value = serde_json::to_value(description).unwrap();
        let paragraphs = value["content"].as_array().unwrap();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0]["content"][0]["text"], "Description: <TODO>");
        assert_eq!(paragraphs[1]["content"][2]["text"], "- http://s1");
    }

    #[test]
    fn serializes_remote_link() {
        let request = JiraRemoteLinkRequest {
            object: JiraRemoteLinkObject {
                url: "https://github.com/o/r/issues/42",
                title: "Github Issue",
            },
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "object": {
                    "url": "https://github.com/o/r/issues/42",
                    "title": "Github Issue"
                }
            })
        );
    }

    fn sample_spec() -> TicketSpec {
        TicketSpec::build(
            "Fix race in X",
            "Description: <TODO>\n\nReferences\n- http://s1\n".to_string(),
            "DLIS",
            "Bug",
            &[],
        )
        .unwrap()
    }

    fn mock_client(server: &MockServer) -> JiraClient {
        JiraClient::new(
            server.base_url(),
            "dev@example.com".to_string(),
            "token".to_string(),
        )
    }

    #[tokio::test]
    async fn creates_issue_and_returns_key() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/api/3/issue")
                    .header(
                        "authorization",
                        format!("Basic {}", BASE64_STANDARD.encode("dev@example.com:token")),
                    )
                    .json_body_partial(r#"{"fields":{"project":{"key":"DLIS"},"summary":"Fix race in X"}}"#);
                then.status(201).json_body(json!({
                    "id": "10001",
                    "key": "DLIS-101",
                    "self": "https://jira.example.com/rest/api/3/issue/10001"
                }));
            })
            .await;

        let key = mock_client(&server).create_ticket(&sample_spec()).await.unwrap();

        create.assert_async().await;
        assert_eq!(key, "DLIS-101");
    }

    #[tokio::test]
    async fn rejected_issue_is_a_creation_error() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/3/issue");
                then.status(400)
                    .body(r#"{"errors":{"components":"Component name 'X' is not valid"}}"#);
            })
            .await;

        let err = mock_client(&server)
            .create_ticket(&sample_spec())
            .await
            .unwrap_err();

        create.assert_async().await;
        match err {
            AppError::Creation(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("components"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn attaches_remote_link() {
        let server = MockServer::start_async().await;
        let link = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/api/3/issue/DLIS-101/remotelink")
                    .json_body(json!({
                        "object": { "url": "http://s1", "title": "Slack" }
                    }));
                then.status(201).json_body(json!({ "id": 1 }));
            })
            .await;

        mock_client(&server)
            .add_link("DLIS-101", &LinkEntry::new("Slack", "http://s1"))
            .await
            .unwrap();

        link.assert_async().await;
    }

    #[tokio::test]
    async fn failed_remote_link_is_a_link_attach_error() {
        let server = MockServer::start_async().await;
        let link = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/3/issue/DLIS-101/remotelink");
                then.status(500).body("internal error");
            })
            .await;

        let err = mock_client(&server)
            .add_link("DLIS-101", &LinkEntry::new("Slack", "http://s1"))
            .await
            .unwrap_err();

        link.assert_async().await;
        match err {
            AppError::LinkAttach { key, title, reason } => {
                assert_eq!(key, "DLIS-101");
                assert_eq!(title, "Slack");
                assert!(reason.contains("500"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
