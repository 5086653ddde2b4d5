use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::domain::description::compose_description;
use crate::domain::event::{EventSink, RunEvent};
use crate::domain::issue::{IssueReference, IssueSource};
use crate::domain::links::{LinkEntry, LinkRegistry, SOURCE_LINK_TITLE};
use crate::domain::ticket::{Component, TicketResult, TicketSpec};
use crate::error::{AppError, AppResult};
use crate::services::{CodeHostReader, TicketTracker};

pub const DRY_RUN_KEY: &str = "FAKE-KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkFailurePolicy {
    /// Stop at the first failed attachment.
    #[default]
    Abort,
    /// Attach what can be attached, then report the failures.
    Continue,
}

#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub title: Option<String>,
    pub source: Option<IssueSource>,
    pub links: Vec<LinkEntry>,
    pub board: String,
    pub issue_type: String,
    pub components: Vec<String>,
    pub append_issue_number: bool,
    pub dry_run: bool,
    pub link_failure: LinkFailurePolicy,
}

impl TicketRequest {
    pub fn validate(&self) -> AppResult<()> {
        let has_title = self
            .title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty());
        if self.source.is_none() && !has_title {
            return Err(AppError::Validation(
                "a --title must be specified if no --issue is provided".to_string(),
            ));
        }
        if self.source.is_none() && self.links.is_empty() {
            return Err(AppError::Validation(
                "must specify some --link values for context if no --issue is provided"
                    .to_string(),
            ));
        }
        if let Some(link) = self.links.iter().find(|link| link.title == SOURCE_LINK_TITLE) {
            return Err(AppError::Validation(format!(
                "link title '{SOURCE_LINK_TITLE}' is reserved for the source issue ({})",
                link.url
            )));
        }
        if let Some(link) = self.links.iter().find(|link| link.url.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "link '{}' has an empty URL",
                link.title
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TicketOutcome {
    pub ticket: TicketResult,
    pub links_attached: usize,
}

pub async fn create_ticket_from_request(
    ctx: &AppContext,
    request: TicketRequest,
    sink: &mut dyn EventSink,
) -> AppResult<TicketOutcome> {
    request.validate()?;

    let mut links = LinkRegistry::new();
    for link in &request.links {
        links.add(link.title.clone(), link.url.clone());
    }

    let mut components = request.components.clone();
    let mut summary = request.title.clone().unwrap_or_default();
    let mut body = None;

    if let Some(source) = &request.source {
        let reference = resolve_source(ctx.code_host.as_ref(), source).await?;
        sink.emit(RunEvent::SourceResolved(reference.clone()));

        links.add(SOURCE_LINK_TITLE, reference.url.clone());
        components.push(Component::GitHub.as_str().to_string());

        if summary.trim().is_empty() {
            summary = default_summary(&reference, source.number(), request.append_issue_number);
            info!(%summary, "using source issue title as ticket summary");
        }
        body = Some(reference.body);
    }

    let description = compose_description(body.as_deref(), &links);
    let spec = TicketSpec::build(
        &summary,
        description,
        &request.board,
        &request.issue_type,
        &components,
    )?;

    let ticket = submit_ticket(ctx.ticket_tracker.as_ref(), spec, request.dry_run, sink).await?;
    let links_attached = attach_links(
        ctx.ticket_tracker.as_ref(),
        &ticket.key,
        &links,
        request.dry_run,
        request.link_failure,
        sink,
    )
    .await?;

    sink.emit(RunEvent::Finished);
    Ok(TicketOutcome {
        ticket,
        links_attached,
    })
}

pub async fn resolve_source(
    code_host: &dyn CodeHostReader,
    source: &IssueSource,
) -> AppResult<IssueReference> {
    match source {
        IssueSource::Remote { repo, number } => code_host.fetch_issue(repo, *number).await,
        IssueSource::Prefetched { reference, .. } => Ok(reference.clone()),
    }
}

fn default_summary(reference: &IssueReference, number: u64, append_issue_number: bool) -> String {
    let title = reference.title.trim();
    if append_issue_number {
        format!("{title} #{number}")
    } else {
        title.to_string()
    }
}

/// Creates the ticket, or fabricates [`DRY_RUN_KEY`] without touching the tracker.
/// The browse URL is emitted before returning so it is visible even if linking fails.
pub async fn submit_ticket(
    tracker: &dyn TicketTracker,
    spec: TicketSpec,
    dry_run: bool,
    sink: &mut dyn EventSink,
) -> AppResult<TicketResult> {
    sink.emit(RunEvent::FieldSummary(spec.clone()));

    let key = if dry_run {
        DRY_RUN_KEY.to_string()
    } else {
        tracker.create_ticket(&spec).await?
    };

    let result = TicketResult {
        browse_url: tracker.browse_url(&key),
        key,
    };
    info!(key = %result.key, url = %result.browse_url, dry_run, "ticket ready");
    sink.emit(RunEvent::TicketCreated {
        result: result.clone(),
        dry_run,
    });
    Ok(result)
}

/// Attaches links in registry order. Returns how many were attached.
pub async fn attach_links(
    tracker: &dyn TicketTracker,
    key: &str,
    links: &LinkRegistry,
    dry_run: bool,
    policy: LinkFailurePolicy,
    sink: &mut dyn EventSink,
) -> AppResult<usize> {
    if links.is_empty() {
        debug!(key, "no links to attach");
        return Ok(0);
    }

    let mut attached = 0;
    let mut failed = 0;

    for link in links {
        sink.emit(RunEvent::LinkAttempted {
            key: key.to_string(),
            link: link.clone(),
        });
        if dry_run {
            continue;
        }

        match tracker.add_link(key, link).await {
            Ok(()) => {
                attached += 1;
                sink.emit(RunEvent::LinkAttached {
                    key: key.to_string(),
                    link: link.clone(),
                });
            }
            Err(err) if policy == LinkFailurePolicy::Continue => {
                failed += 1;
                warn!(key, title = %link.title, error = %err, "link attachment failed, continuing");
                sink.emit(RunEvent::LinkFailed {
                    key: key.to_string(),
                    link: link.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        return Err(AppError::LinkAttachments {
            key: key.to_string(),
            failed,
            total: links.len(),
        });
    }
    Ok(attached)
}
