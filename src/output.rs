use std::io::{self, Write};

use tracing::warn;

use crate::domain::event::{EventSink, RunEvent};
use crate::domain::ticket::TicketSpec;

/// Renders run events as they happen, so the ticket URL is on screen before
/// any link is attempted.
pub struct ConsoleSink<W: Write + Send> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: RunEvent) {
        let rendered = render(&event);
        let written = self
            .out
            .write_all(rendered.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!(error = %err, output = %rendered.trim_end(), "failed to write run output");
        }
    }
}

pub fn render(event: &RunEvent) -> String {
    match event {
        RunEvent::SourceResolved(reference) => {
            format!("Source issue: {} ({})\n", reference.title, reference.url)
        }
        RunEvent::FieldSummary(spec) => render_fields(spec),
        RunEvent::TicketCreated { result, dry_run } => {
            let prefix = if *dry_run { "[dry run] " } else { "" };
            format!("{prefix}JIRA Ticket created at URL: {}\n", result.browse_url)
        }
        RunEvent::LinkAttempted { key, link } => {
            format!("Adding link to {key}: {} -> {}\n", link.title, link.url)
        }
        RunEvent::LinkAttached { link, .. } => format!("  linked {}\n", link.title),
        RunEvent::LinkFailed { link, reason, .. } => {
            format!("  failed to link {}: {reason}\n", link.title)
        }
        RunEvent::Finished => "Done!\n".to_string(),
    }
}

fn render_fields(spec: &TicketSpec) -> String {
    let components = spec
        .components
        .iter()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::from("Creating ticket with fields:\n");
    out.push_str(&format!("  project: {}\n", spec.board.as_str()));
    out.push_str(&format!("  summary: {}\n", spec.summary));
    out.push_str(&format!("  issuetype: {}\n", spec.issue_type.as_str()));
    out.push_str(&format!("  components: [{components}]\n"));
    out.push_str("  description:\n");
    for line in spec.description.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
