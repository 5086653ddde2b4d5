use async_trait::async_trait;

use crate::domain::links::LinkEntry;
use crate::domain::ticket::TicketSpec;
use crate::error::AppResult;

#[async_trait]
pub trait TicketTracker: Send + Sync {
    /// Creates the ticket and returns its key.
    async fn create_ticket(&self, spec: &TicketSpec) -> AppResult<String>;
    async fn add_link(&self, key: &str, link: &LinkEntry) -> AppResult<()>;
    fn browse_url(&self, key: &str) -> String;
}
