pub mod code_host;
pub mod issue_tracker;

pub use code_host::CodeHostReader;
pub use issue_tracker::TicketTracker;
