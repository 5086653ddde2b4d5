use std::sync::Arc;

use crate::services::{CodeHostReader, TicketTracker};

#[derive(Clone)]
pub struct AppContext {
    pub ticket_tracker: Arc<dyn TicketTracker>,
    pub code_host: Arc<dyn CodeHostReader>,
}

impl AppContext {
    pub fn new(ticket_tracker: Arc<dyn TicketTracker>, code_host: Arc<dyn CodeHostReader>) -> Self {
        Self {
            ticket_tracker,
            code_host,
        }
    }
}
