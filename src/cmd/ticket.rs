use std::fs;
use std::path::PathBuf;

use clap::Args;
use clap::builder::PossibleValuesParser;

use crate::context::AppContext;
use crate::domain::event::EventSink;
use crate::domain::issue::{IssueReference, IssueSource, RepoRef};
use crate::domain::links::LinkEntry;
use crate::domain::ticket::{Board, Component, IssueType};
use crate::error::{AppError, AppResult};
use crate::workflow::ticket::{
    LinkFailurePolicy, TicketOutcome, TicketRequest, create_ticket_from_request,
};

#[derive(Args, Debug, Clone)]
pub struct TicketCommandArgs {
    /// Show what would happen without creating a ticket or attaching links.
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub issue number to seed the ticket from and link back to.
    #[arg(long, help_heading = "GitHub")]
    pub issue: Option<u64>,

    /// Repository holding the issue, as `name` or `owner/name`.
    #[arg(long, default_value = "server", help_heading = "GitHub")]
    pub repo: String,

    /// Issue URL already known to the caller; skips the GitHub lookup.
    #[arg(long, help_heading = "GitHub")]
    pub github_html_url: Option<String>,

    /// Issue title already known to the caller.
    #[arg(long, help_heading = "GitHub")]
    pub github_issue_title: Option<String>,

    /// File containing the issue body.
    #[arg(long, help_heading = "GitHub")]
    pub github_issue_body_file: Option<PathBuf>,

    /// Ticket title. Defaults to the GitHub issue title when --issue is given.
    #[arg(long, help_heading = "Jira")]
    pub title: Option<String>,

    /// Append ` #<issue>` to a title taken from the GitHub issue.
    #[arg(long, help_heading = "Jira")]
    pub append_issue_number: bool,

    /// Issue type.
    #[arg(
        long = "type",
        default_value = "Story",
        value_parser = PossibleValuesParser::new(IssueType::ALL.map(|issue_type| issue_type.as_str())),
        help_heading = "Jira"
    )]
    pub issue_type: String,

    /// Component name; may be repeated.
    #[arg(
        long = "component",
        value_parser = PossibleValuesParser::new(Component::ALL.map(|component| component.as_str())),
        help_heading = "Jira"
    )]
    pub components: Vec<String>,

    /// Jira board (project key).
    #[arg(
        long,
        default_value = "DLIS",
        value_parser = PossibleValuesParser::new(Board::ALL.map(|board| board.as_str())),
        help_heading = "Jira"
    )]
    pub jira_board: String,

    /// Jira base URL; overrides JIRA_API_URL.
    #[arg(long, help_heading = "Jira")]
    pub jira_api_url: Option<String>,

    /// Jira username; overrides JIRA_USER.
    #[arg(long, help_heading = "Jira")]
    pub jira_user: Option<String>,

    /// Reference link (Slack thread, PR comment, ...) as `URL` or `Title=URL`; may be repeated.
    #[arg(long = "link", help_heading = "References")]
    pub links: Vec<String>,

    /// Keep attaching remaining links after one fails.
    #[arg(long, help_heading = "References")]
    pub continue_on_link_error: bool,
}

impl TicketCommandArgs {
    pub fn into_request(self, default_owner: &str) -> AppResult<TicketRequest> {
        let source = self.issue_source(default_owner)?;
        let request = TicketRequest {
            title: self.title,
            source,
            links: self.links.iter().map(|link| LinkEntry::parse(link)).collect(),
            board: self.jira_board,
            issue_type: self.issue_type,
            components: self.components,
            append_issue_number: self.append_issue_number,
            dry_run: self.dry_run,
            link_failure: if self.continue_on_link_error {
                LinkFailurePolicy::Continue
            } else {
                LinkFailurePolicy::Abort
            },
        };
        request.validate()?;
        Ok(request)
    }

    fn issue_source(&self, default_owner: &str) -> AppResult<Option<IssueSource>> {
        let prefetched = (
            self.github_html_url.as_ref(),
            self.github_issue_title.as_ref(),
            self.github_issue_body_file.as_ref(),
        );
        let any_prefetched =
            prefetched.0.is_some() || prefetched.1.is_some() || prefetched.2.is_some();

        let Some(number) = self.issue else {
            if any_prefetched {
                return Err(AppError::Validation(
                    "--github-* issue details require --issue".to_string(),
                ));
            }
            return Ok(None);
        };

        match prefetched {
            (Some(url), Some(title), Some(body_file)) => {
                let body = fs::read_to_string(body_file)?;
                Ok(Some(IssueSource::Prefetched {
                    number,
                    reference: IssueReference {
                        url: url.clone(),
                        title: title.clone(),
                        body,
                    },
                }))
            }
            (None, None, None) => Ok(Some(IssueSource::Remote {
                repo: RepoRef::parse(&self.repo, default_owner)?,
                number,
            })),
            _ => Err(AppError::Validation(
                "--github-html-url, --github-issue-title and --github-issue-body-file must be given together"
                    .to_string(),
            )),
        }
    }
}

pub async fn run(
    ctx: &AppContext,
    request: TicketRequest,
    sink: &mut dyn EventSink,
) -> AppResult<TicketOutcome> {
    create_ticket_from_request(ctx, request, sink).await
}
