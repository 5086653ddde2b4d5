pub mod description;
pub mod event;
pub mod issue;
pub mod links;
pub mod ticket;
