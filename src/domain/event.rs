use crate::domain::issue::IssueReference;
use crate::domain::links::LinkEntry;
use crate::domain::ticket::{TicketResult, TicketSpec};

/// Operator-facing progress of a run, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    SourceResolved(IssueReference),
    FieldSummary(TicketSpec),
    TicketCreated { result: TicketResult, dry_run: bool },
    LinkAttempted { key: String, link: LinkEntry },
    LinkAttached { key: String, link: LinkEntry },
    LinkFailed {
        key: String,
        link: LinkEntry,
        reason: String,
    },
    Finished,
}

pub trait EventSink: Send {
    fn emit(&mut self, event: RunEvent);
}

/// Keeps every event in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<RunEvent>,
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn emit(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}
